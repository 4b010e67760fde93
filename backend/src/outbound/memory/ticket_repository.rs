//! `TicketRepository` held in process memory.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{TicketPersistenceError, TicketRepository};
use crate::domain::{StatusChange, Ticket, TicketId, TicketSelection};

#[derive(Debug, Default)]
struct Tables {
    tickets: HashMap<TicketId, Ticket>,
    history: Vec<StatusChange>,
}

/// Ticket store backed by a single mutex, so an update and its history
/// record land together.
#[derive(Debug, Default)]
pub struct InMemoryTicketRepository {
    tables: Mutex<Tables>,
}

impl InMemoryTicketRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> Result<MutexGuard<'_, Tables>, TicketPersistenceError> {
        self.tables
            .lock()
            .map_err(|_| TicketPersistenceError::query("ticket store lock poisoned"))
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn insert(&self, ticket: &Ticket) -> Result<(), TicketPersistenceError> {
        let mut tables = self.guard()?;
        if tables.tickets.contains_key(&ticket.id) {
            return Err(TicketPersistenceError::query("duplicate ticket id"));
        }
        tables.tickets.insert(ticket.id, ticket.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, TicketPersistenceError> {
        Ok(self.guard()?.tickets.get(id).cloned())
    }

    async fn list(
        &self,
        selection: &TicketSelection,
    ) -> Result<Vec<Ticket>, TicketPersistenceError> {
        let tables = self.guard()?;
        let mut matching: Vec<Ticket> = tables
            .tickets
            .values()
            .filter(|ticket| selection.matches(ticket))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(matching)
    }

    async fn update(
        &self,
        ticket: &Ticket,
        change: Option<StatusChange>,
    ) -> Result<bool, TicketPersistenceError> {
        let mut tables = self.guard()?;
        let Some(stored) = tables.tickets.get_mut(&ticket.id) else {
            return Ok(false);
        };
        *stored = ticket.clone();
        tables.history.extend(change);
        Ok(true)
    }

    async fn delete(&self, id: &TicketId) -> Result<bool, TicketPersistenceError> {
        let mut tables = self.guard()?;
        let removed = tables.tickets.remove(id).is_some();
        if removed {
            tables.history.retain(|change| change.ticket_id != *id);
        }
        Ok(removed)
    }

    async fn history(&self, id: &TicketId) -> Result<Vec<StatusChange>, TicketPersistenceError> {
        let tables = self.guard()?;
        let mut changes: Vec<StatusChange> = tables
            .history
            .iter()
            .filter(|change| change.ticket_id == *id)
            .cloned()
            .collect();
        changes.sort_by_key(|change| change.changed_at);
        Ok(changes)
    }
}
