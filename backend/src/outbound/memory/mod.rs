//! In-process adapters for the driven ports, used by tests and local
//! demos that run without PostgreSQL.

mod ticket_repository;
mod user_repository;

pub use ticket_repository::InMemoryTicketRepository;
pub use user_repository::InMemoryUserRepository;
