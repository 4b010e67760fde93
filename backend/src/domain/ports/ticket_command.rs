//! Driving port for ticket mutations.

use async_trait::async_trait;

use crate::domain::{Error, TicketId, TicketPatch, TicketSubmission, User};

use super::TicketView;

/// Create, update, and delete tickets on behalf of an authenticated actor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketCommand: Send + Sync {
    /// Open a ticket owned by `actor`.
    async fn create(&self, actor: &User, submission: TicketSubmission)
    -> Result<TicketView, Error>;

    /// Apply a sparse patch. Nothing is written unless every field is allowed.
    async fn update(
        &self,
        actor: &User,
        id: &TicketId,
        patch: TicketPatch,
    ) -> Result<TicketView, Error>;

    /// Hard-delete a ticket.
    async fn delete(&self, actor: &User, id: &TicketId) -> Result<(), Error>;
}
