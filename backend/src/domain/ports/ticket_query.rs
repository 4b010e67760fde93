//! Driving port for ticket reads and dashboard counts.

use async_trait::async_trait;

use crate::domain::{
    DashboardStats, DisplayName, Error, StatusChange, Ticket, TicketFilter, TicketId, User, UserId,
    Username,
};

/// Public identity of a ticket's creator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatorSummary {
    /// Creator id.
    pub id: UserId,
    /// Creator login name.
    pub username: Username,
    /// Creator display name.
    pub name: DisplayName,
}

impl From<&User> for CreatorSummary {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id(),
            username: user.username().clone(),
            name: user.name().clone(),
        }
    }
}

/// A ticket together with its creator, when the creator still exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketView {
    /// The ticket record.
    pub ticket: Ticket,
    /// Creator summary; `None` once the account is gone.
    pub creator: Option<CreatorSummary>,
}

/// A single ticket with its status history, oldest change first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDetail {
    /// Ticket and creator.
    pub view: TicketView,
    /// Recorded status changes.
    pub history: Vec<StatusChange>,
}

/// Read tickets visible to an actor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketQuery: Send + Sync {
    /// Tickets in the actor's scope narrowed by `filter`, newest first.
    async fn list(&self, actor: &User, filter: TicketFilter) -> Result<Vec<TicketView>, Error>;

    /// One ticket with history, if the actor may view it.
    async fn get(&self, actor: &User, id: &TicketId) -> Result<TicketDetail, Error>;

    /// Counts over every ticket in the actor's scope.
    async fn dashboard_stats(&self, actor: &User) -> Result<DashboardStats, Error>;
}
