//! Domain primitives, policy, and services.
//!
//! Purpose: model helpdesk users and tickets, decide who may do what to a
//! ticket, and aggregate ticket counts. Nothing in here knows about HTTP or
//! SQL; adapters reach the domain through [`ports`].
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `User`, `Role`, `Department`: identities and their department binding.
//! - `Ticket`, `TicketPatch`, `TicketSelection`: ticket records, sparse updates,
//!   and scoped listings.
//! - `policy`: pure access decisions.
//! - `DashboardStats`: grouped ticket counts.
//! - `TicketService`, `UserAccountService`: use-case implementations.

pub mod auth;
pub mod error;
pub mod policy;
pub mod ports;
pub mod stats;
pub mod taxonomy;
pub mod ticket;
pub mod trace_id;
pub mod user;

mod ticket_service;
mod user_account_service;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MAX_BYTES, PASSWORD_MIN_LENGTH,
    PasswordChange, ProfileUpdate, ProfileValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::stats::{DashboardStats, DepartmentCounts, PriorityCounts, compute_stats};
pub use self::ticket::{
    EDITABLE_STATUSES, FieldAccess, PatchError, PatchOutcome, Priority, StatusChange, Ticket,
    TicketDraft, TicketField, TicketFilter, TicketId, TicketPatch, TicketSelection, TicketScope,
    TicketStatus, TicketSubmission, TicketValidationError,
};
pub use self::ticket_service::TicketService;
pub use self::trace_id::TraceId;
pub use self::user::{
    Department, DisplayName, PasswordHash, Role, User, UserId, UserValidationError, Username,
};
pub use self::user_account_service::UserAccountService;

/// HTTP header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use helpdesk::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
