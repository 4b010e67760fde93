//! Wires the PostgreSQL adapters and domain services into [`HttpState`].

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use helpdesk::domain::{TicketService, UserAccountService};
use helpdesk::inbound::http::state::HttpState;
use helpdesk::outbound::persistence::{DbPool, DieselTicketRepository, DieselUserRepository};
use helpdesk::outbound::security::BcryptPasswordHasher;

/// Build the handler state over a shared pool.
pub(crate) fn build_http_state(pool: &DbPool, bcrypt_cost: u32) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let tickets = Arc::new(DieselTicketRepository::new(pool.clone()));
    let hasher = Arc::new(BcryptPasswordHasher::new(bcrypt_cost));
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let accounts = Arc::new(UserAccountService::new(users.clone(), hasher));
    let ticket_service = Arc::new(TicketService::new(tickets, users, clock));

    HttpState {
        login: accounts.clone(),
        identity: accounts.clone(),
        tickets: ticket_service.clone(),
        tickets_query: ticket_service,
        profile: accounts.clone(),
        profile_command: accounts,
    }
}
