//! Driving ports for profile self-service.

use async_trait::async_trait;

use crate::domain::{Error, ProfileUpdate, User, UserId};

/// Read the current user's profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Return the profile for the authenticated user.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error>;
}

/// Change the current user's display name and password.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Apply `update` to `actor`'s account and return the stored result.
    async fn update_profile(&self, actor: &User, update: ProfileUpdate) -> Result<User, Error>;
}
