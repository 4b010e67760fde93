//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{ticket_status_changes, tickets, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub department: Option<String>,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub role: &'a str,
    pub department: Option<&'a str>,
}

/// Changeset for the self-service profile fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserProfileUpdate<'a> {
    pub name: &'a str,
    pub password_hash: &'a str,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the tickets table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tickets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TicketRow {
    pub id: Uuid,
    pub subject: String,
    pub description: String,
    pub department: String,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub priority: String,
    pub status: String,
    pub comment: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for new tickets.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tickets)]
pub(crate) struct NewTicketRow<'a> {
    pub id: Uuid,
    pub subject: &'a str,
    pub description: &'a str,
    pub department: &'a str,
    pub category: Option<&'a str>,
    pub subcategory: Option<&'a str>,
    pub priority: &'a str,
    pub status: &'a str,
    pub comment: Option<&'a str>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset overwriting every mutable ticket column.
///
/// `treat_none_as_null` so clearing the comment writes NULL.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tickets)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct TicketUpdate<'a> {
    pub subject: &'a str,
    pub description: &'a str,
    pub department: &'a str,
    pub category: Option<&'a str>,
    pub subcategory: Option<&'a str>,
    pub priority: &'a str,
    pub status: &'a str,
    pub comment: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for the status change log.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = ticket_status_changes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StatusChangeRow {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub actor_id: Uuid,
    pub from_status: String,
    pub to_status: String,
    pub comment: Option<String>,
    pub changed_at: DateTime<Utc>,
}
