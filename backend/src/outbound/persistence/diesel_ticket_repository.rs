//! PostgreSQL-backed `TicketRepository`.
//!
//! Listing pushes scope and filters into SQL. Updates and their status
//! change record share one transaction.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{TicketPersistenceError, TicketRepository};
use crate::domain::{
    Department, Priority, StatusChange, Ticket, TicketId, TicketScope, TicketSelection,
    TicketStatus, UserId,
};

use super::error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewTicketRow, StatusChangeRow, TicketRow, TicketUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{ticket_status_changes, tickets};

/// Diesel-backed implementation of the ticket repository port.
#[derive(Clone)]
pub struct DieselTicketRepository {
    pool: DbPool,
}

impl DieselTicketRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TicketPersistenceError {
    map_basic_pool_error(error, TicketPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TicketPersistenceError {
    map_basic_diesel_error(
        error,
        TicketPersistenceError::query,
        TicketPersistenceError::connection,
    )
}

fn parse_column<T>(column: &str, raw: &str) -> Result<T, TicketPersistenceError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|err| TicketPersistenceError::query(format!("invalid {column} column: {err}")))
}

fn row_to_ticket(row: TicketRow) -> Result<Ticket, TicketPersistenceError> {
    Ok(Ticket {
        id: TicketId::from_uuid(row.id),
        department: parse_column::<Department>("department", &row.department)?,
        priority: parse_column::<Priority>("priority", &row.priority)?,
        status: parse_column::<TicketStatus>("status", &row.status)?,
        subject: row.subject,
        description: row.description,
        category: row.category,
        subcategory: row.subcategory,
        comment: row.comment,
        created_by: UserId::from_uuid(row.created_by),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_status_change(row: StatusChangeRow) -> Result<StatusChange, TicketPersistenceError> {
    Ok(StatusChange {
        id: row.id,
        ticket_id: TicketId::from_uuid(row.ticket_id),
        actor_id: UserId::from_uuid(row.actor_id),
        from_status: parse_column::<TicketStatus>("from_status", &row.from_status)?,
        to_status: parse_column::<TicketStatus>("to_status", &row.to_status)?,
        comment: row.comment,
        changed_at: row.changed_at,
    })
}

fn status_change_row(change: StatusChange) -> StatusChangeRow {
    StatusChangeRow {
        id: change.id,
        ticket_id: *change.ticket_id.as_uuid(),
        actor_id: *change.actor_id.as_uuid(),
        from_status: change.from_status.as_str().to_owned(),
        to_status: change.to_status.as_str().to_owned(),
        comment: change.comment,
        changed_at: change.changed_at,
    }
}

/// Build an `ILIKE` pattern matching `term` literally anywhere in a column.
fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl TicketRepository for DieselTicketRepository {
    async fn insert(&self, ticket: &Ticket) -> Result<(), TicketPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewTicketRow {
            id: *ticket.id.as_uuid(),
            subject: &ticket.subject,
            description: &ticket.description,
            department: ticket.department.as_str(),
            category: ticket.category.as_deref(),
            subcategory: ticket.subcategory.as_deref(),
            priority: ticket.priority.as_str(),
            status: ticket.status.as_str(),
            comment: ticket.comment.as_deref(),
            created_by: *ticket.created_by.as_uuid(),
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
        };
        diesel::insert_into(tickets::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, TicketPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = tickets::table
            .filter(tickets::id.eq(id.as_uuid()))
            .select(TicketRow::as_select())
            .first::<TicketRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_ticket).transpose()
    }

    async fn list(
        &self,
        selection: &TicketSelection,
    ) -> Result<Vec<Ticket>, TicketPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = tickets::table.into_boxed();

        query = match selection.scope {
            TicketScope::Owner(owner) => query.filter(tickets::created_by.eq(*owner.as_uuid())),
            TicketScope::Department(department) => {
                query.filter(tickets::department.eq(department.as_str()))
            }
        };
        let filter = &selection.filter;
        if let Some(department) = filter.department {
            query = query.filter(tickets::department.eq(department.as_str()));
        }
        if let Some(priority) = filter.priority {
            query = query.filter(tickets::priority.eq(priority.as_str()));
        }
        if let Some(status) = filter.status {
            query = query.filter(tickets::status.eq(status.as_str()));
        }
        if let Some(term) = filter.search.as_deref() {
            let pattern = contains_pattern(term);
            query = query.filter(
                tickets::subject
                    .ilike(pattern.clone())
                    .or(tickets::description.ilike(pattern)),
            );
        }

        let rows: Vec<TicketRow> = query
            .order((tickets::created_at.desc(), tickets::id.asc()))
            .select(TicketRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_ticket).collect()
    }

    async fn update(
        &self,
        ticket: &Ticket,
        change: Option<StatusChange>,
    ) -> Result<bool, TicketPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = *ticket.id.as_uuid();
        let changes = TicketUpdate {
            subject: &ticket.subject,
            description: &ticket.description,
            department: ticket.department.as_str(),
            category: ticket.category.as_deref(),
            subcategory: ticket.subcategory.as_deref(),
            priority: ticket.priority.as_str(),
            status: ticket.status.as_str(),
            comment: ticket.comment.as_deref(),
            updated_at: ticket.updated_at,
        };
        let history_row = change.map(status_change_row);

        conn.transaction::<bool, diesel::result::Error, _>(|conn| {
            async move {
                let updated = diesel::update(tickets::table.filter(tickets::id.eq(id)))
                    .set(&changes)
                    .execute(conn)
                    .await?;
                if updated == 0 {
                    return Ok(false);
                }
                if let Some(row) = history_row {
                    diesel::insert_into(ticket_status_changes::table)
                        .values(&row)
                        .execute(conn)
                        .await?;
                }
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &TicketId) -> Result<bool, TicketPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(tickets::table.filter(tickets::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn history(&self, id: &TicketId) -> Result<Vec<StatusChange>, TicketPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<StatusChangeRow> = ticket_status_changes::table
            .filter(ticket_status_changes::ticket_id.eq(id.as_uuid()))
            .order((
                ticket_status_changes::changed_at.asc(),
                ticket_status_changes::id.asc(),
            ))
            .select(StatusChangeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_status_change).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    use super::*;

    #[fixture]
    fn row() -> TicketRow {
        let now = Utc::now();
        TicketRow {
            id: Uuid::new_v4(),
            subject: "[Taxation - Form 16] Missing form".to_owned(),
            description: "Not received".to_owned(),
            department: "FINANCE".to_owned(),
            category: Some("Taxation".to_owned()),
            subcategory: Some("Form 16".to_owned()),
            priority: "LOW".to_owned(),
            status: "ON_HOLD".to_owned(),
            comment: None,
            created_by: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn rows_convert_to_tickets(row: TicketRow) {
        let ticket = row_to_ticket(row).expect("valid row");
        assert_eq!(ticket.department, Department::Finance);
        assert_eq!(ticket.status, TicketStatus::OnHold);
        assert_eq!(ticket.priority, Priority::Low);
    }

    #[rstest]
    fn unknown_status_is_a_query_error(mut row: TicketRow) {
        row.status = "DONE".to_owned();
        let err = row_to_ticket(row).expect_err("unknown status");
        assert!(err.to_string().contains("invalid status column"));
    }

    #[rstest]
    #[case("laptop", "%laptop%")]
    #[case("50%_off", "%50\\%\\_off%")]
    #[case("a\\b", "%a\\\\b%")]
    fn search_terms_are_matched_literally(#[case] term: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(term), expected);
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("refused"));
        assert!(matches!(err, TicketPersistenceError::Connection { .. }));
    }
}
