//! Driving port that turns a session's user id into the acting user.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Resolve the acting user for a request.
///
/// The record is loaded fresh on every call; role and department are never
/// taken from the client.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Load the user behind `user_id`, or fail with `unauthorized` when the
    /// account no longer exists.
    async fn resolve(&self, user_id: &UserId) -> Result<User, Error>;
}
