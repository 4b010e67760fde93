//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Enum-like
//! columns are `VARCHAR` guarded by `CHECK` constraints and hold the
//! SCREAMING_SNAKE_CASE wire names.

diesel::table! {
    /// User accounts. `department` is NULL for employees and equals `role`
    /// for managers.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        password_hash -> Varchar,
        name -> Varchar,
        role -> Varchar,
        department -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Helpdesk tickets.
    tickets (id) {
        id -> Uuid,
        subject -> Text,
        description -> Text,
        department -> Varchar,
        category -> Nullable<Varchar>,
        subcategory -> Nullable<Varchar>,
        priority -> Varchar,
        status -> Varchar,
        comment -> Nullable<Text>,
        /// Submitting user. Not a foreign key so tickets outlive accounts.
        created_by -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only status transition log. Rows cascade with their ticket.
    ticket_status_changes (id) {
        id -> Uuid,
        ticket_id -> Uuid,
        actor_id -> Uuid,
        from_status -> Varchar,
        to_status -> Varchar,
        comment -> Nullable<Text>,
        changed_at -> Timestamptz,
    }
}

diesel::joinable!(ticket_status_changes -> tickets (ticket_id));

diesel::allow_tables_to_appear_in_same_query!(users, tickets, ticket_status_changes);
