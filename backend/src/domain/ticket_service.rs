//! Ticket domain service implementing the ticket command and query ports.
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    CreatorSummary, TicketCommand, TicketDetail, TicketPersistenceError, TicketQuery,
    TicketRepository, TicketView, UserPersistenceError, UserRepository,
};
use crate::domain::{
    DashboardStats, Error, PatchError, PatchOutcome, Ticket, TicketDraft, TicketFilter, TicketId,
    TicketPatch, TicketSelection, TicketSubmission, TicketValidationError, User, UserId,
    compute_stats, policy,
};

/// Ticket service backed by a ticket store and a user store.
#[derive(Clone)]
pub struct TicketService<T, U> {
    tickets: Arc<T>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<T, U> TicketService<T, U> {
    /// Create a service over the given repositories and clock.
    pub fn new(tickets: Arc<T>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            tickets,
            users,
            clock,
        }
    }
}

pub(crate) fn map_ticket_repository_error(error: TicketPersistenceError) -> Error {
    match error {
        TicketPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("ticket repository unavailable: {message}"))
        }
        TicketPersistenceError::Query { message } => {
            Error::internal(format!("ticket repository error: {message}"))
        }
    }
}

pub(crate) fn map_user_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_validation_error(error: &TicketValidationError) -> Error {
    Error::invalid_request(error.to_string())
        .with_details(json!({ "field": error.field(), "code": error.code() }))
}

fn map_patch_error(error: PatchError) -> Error {
    match error {
        PatchError::AccessDenied { denied } => {
            let fields: Vec<&str> = denied.iter().map(|field| field.as_str()).collect();
            Error::forbidden("not permitted to update this ticket")
                .with_details(json!({ "fields": fields }))
        }
        PatchError::Invalid(invalid) => map_validation_error(&invalid),
        PatchError::NoChanges => Error::invalid_request("no valid fields to update")
            .with_details(json!({ "code": "no_changes" })),
    }
}

fn ticket_not_found() -> Error {
    Error::not_found("ticket not found")
}

impl<T, U> TicketService<T, U>
where
    T: TicketRepository,
    U: UserRepository,
{
    async fn load(&self, id: &TicketId) -> Result<Ticket, Error> {
        self.tickets
            .find_by_id(id)
            .await
            .map_err(map_ticket_repository_error)?
            .ok_or_else(ticket_not_found)
    }

    async fn view(&self, ticket: Ticket) -> Result<TicketView, Error> {
        let creator = self
            .users
            .find_by_id(&ticket.created_by)
            .await
            .map_err(map_user_repository_error)?;
        Ok(TicketView {
            creator: creator.as_ref().map(CreatorSummary::from),
            ticket,
        })
    }

    async fn views(&self, tickets: Vec<Ticket>) -> Result<Vec<TicketView>, Error> {
        let ids: Vec<UserId> = tickets
            .iter()
            .map(|ticket| ticket.created_by)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let creators: HashMap<UserId, CreatorSummary> = self
            .users
            .find_by_ids(&ids)
            .await
            .map_err(map_user_repository_error)?
            .iter()
            .map(|user| (*user.id(), CreatorSummary::from(user)))
            .collect();
        Ok(tickets
            .into_iter()
            .map(|ticket| TicketView {
                creator: creators.get(&ticket.created_by).cloned(),
                ticket,
            })
            .collect())
    }

    async fn scoped(&self, actor: &User, filter: TicketFilter) -> Result<Vec<Ticket>, Error> {
        let selection = TicketSelection::for_actor(actor, filter);
        self.tickets
            .list(&selection)
            .await
            .map_err(map_ticket_repository_error)
    }
}

#[async_trait]
impl<T, U> TicketCommand for TicketService<T, U>
where
    T: TicketRepository,
    U: UserRepository,
{
    async fn create(
        &self,
        actor: &User,
        submission: TicketSubmission,
    ) -> Result<TicketView, Error> {
        let draft = TicketDraft::try_new(submission).map_err(|err| map_validation_error(&err))?;
        let ticket = Ticket::open(TicketId::random(), draft, *actor.id(), self.clock.utc());
        self.tickets
            .insert(&ticket)
            .await
            .map_err(map_ticket_repository_error)?;
        info!(
            ticket_id = %ticket.id,
            department = %ticket.department,
            user_id = %actor.id(),
            "ticket opened"
        );
        Ok(TicketView {
            ticket,
            creator: Some(CreatorSummary::from(actor)),
        })
    }

    async fn update(
        &self,
        actor: &User,
        id: &TicketId,
        patch: TicketPatch,
    ) -> Result<TicketView, Error> {
        let current = self.load(id).await?;
        let PatchOutcome {
            ticket,
            status_change,
            ignored,
        } = patch
            .apply(actor, &current, self.clock.utc())
            .map_err(map_patch_error)?;
        if !ignored.is_empty() {
            let fields: Vec<&str> = ignored.iter().map(|field| field.as_str()).collect();
            debug!(ticket_id = %id, user_id = %actor.id(), ?fields, "ignored read-only fields");
        }
        let transition = status_change
            .as_ref()
            .map(|change| (change.from_status, change.to_status));
        let stored = self
            .tickets
            .update(&ticket, status_change)
            .await
            .map_err(map_ticket_repository_error)?;
        if !stored {
            return Err(ticket_not_found());
        }
        if let Some((from, to)) = transition {
            info!(
                ticket_id = %id,
                from = from.as_str(),
                to = to.as_str(),
                user_id = %actor.id(),
                "ticket status changed"
            );
        }
        self.view(ticket).await
    }

    async fn delete(&self, actor: &User, id: &TicketId) -> Result<(), Error> {
        let ticket = self.load(id).await?;
        if !policy::can_delete(actor, &ticket) {
            return Err(Error::forbidden("not permitted to delete this ticket"));
        }
        let removed = self
            .tickets
            .delete(id)
            .await
            .map_err(map_ticket_repository_error)?;
        if !removed {
            return Err(ticket_not_found());
        }
        info!(ticket_id = %id, user_id = %actor.id(), "ticket deleted");
        Ok(())
    }
}

#[async_trait]
impl<T, U> TicketQuery for TicketService<T, U>
where
    T: TicketRepository,
    U: UserRepository,
{
    async fn list(&self, actor: &User, filter: TicketFilter) -> Result<Vec<TicketView>, Error> {
        let tickets = self.scoped(actor, filter).await?;
        self.views(tickets).await
    }

    async fn get(&self, actor: &User, id: &TicketId) -> Result<TicketDetail, Error> {
        let ticket = self.load(id).await?;
        if !policy::can_view(actor, &ticket) {
            return Err(Error::forbidden("not permitted to view this ticket"));
        }
        let history = self
            .tickets
            .history(id)
            .await
            .map_err(map_ticket_repository_error)?;
        Ok(TicketDetail {
            view: self.view(ticket).await?,
            history,
        })
    }

    async fn dashboard_stats(&self, actor: &User) -> Result<DashboardStats, Error> {
        let tickets = self.scoped(actor, TicketFilter::default()).await?;
        Ok(compute_stats(&tickets))
    }
}

#[cfg(test)]
#[path = "ticket_service_tests.rs"]
mod tests;
