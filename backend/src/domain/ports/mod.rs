//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`LoginService`, `IdentityResolver`, `TicketCommand`,
//! `TicketQuery`, `ProfileQuery`, `ProfileCommand`) are called by inbound
//! adapters. Driven ports (`UserRepository`, `TicketRepository`,
//! `PasswordHasher`) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod identity_resolver;
mod login_service;
mod password_hasher;
mod profile;
mod ticket_command;
mod ticket_query;
mod ticket_repository;
mod user_repository;

#[cfg(test)]
pub use identity_resolver::MockIdentityResolver;
pub use identity_resolver::IdentityResolver;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use profile::{MockProfileCommand, MockProfileQuery};
pub use profile::{ProfileCommand, ProfileQuery};
#[cfg(test)]
pub use ticket_command::MockTicketCommand;
pub use ticket_command::TicketCommand;
#[cfg(test)]
pub use ticket_query::MockTicketQuery;
pub use ticket_query::{CreatorSummary, TicketDetail, TicketQuery, TicketView};
#[cfg(test)]
pub use ticket_repository::MockTicketRepository;
pub use ticket_repository::{TicketPersistenceError, TicketRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
