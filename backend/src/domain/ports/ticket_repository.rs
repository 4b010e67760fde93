//! Port for ticket persistence and status history.
//!
//! Adapters own durability only. Authorisation and validation happen in the
//! domain before any of these methods is called.

use async_trait::async_trait;

use crate::domain::{StatusChange, Ticket, TicketId, TicketSelection};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ticket repository adapters.
    pub enum TicketPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "ticket repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "ticket repository query failed: {message}",
    }
}

/// Port for reading and writing tickets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Persist a newly opened ticket.
    async fn insert(&self, ticket: &Ticket) -> Result<(), TicketPersistenceError>;

    /// Find a ticket by id.
    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, TicketPersistenceError>;

    /// Tickets matching `selection`, newest first with ties broken by id.
    async fn list(
        &self,
        selection: &TicketSelection,
    ) -> Result<Vec<Ticket>, TicketPersistenceError>;

    /// Overwrite a ticket and append `change` in the same unit of work.
    ///
    /// Returns `false` when the ticket no longer exists.
    async fn update(
        &self,
        ticket: &Ticket,
        change: Option<StatusChange>,
    ) -> Result<bool, TicketPersistenceError>;

    /// Hard-delete a ticket and its history. Returns `false` when absent.
    async fn delete(&self, id: &TicketId) -> Result<bool, TicketPersistenceError>;

    /// Status changes for a ticket, oldest first.
    async fn history(&self, id: &TicketId) -> Result<Vec<StatusChange>, TicketPersistenceError>;
}
