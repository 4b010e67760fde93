//! Test doubles and an in-memory wiring of the HTTP state.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`); only
//! compiled for tests or with the `test-support` feature.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{PasswordHashError, PasswordHasher, UserRepository};
use crate::domain::{
    DisplayName, PasswordHash, Role, TicketService, User, UserAccountService, UserId, Username,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryTicketRepository, InMemoryUserRepository};

/// Password given to every user created by [`TestWorld::seed_user`].
pub const SEED_PASSWORD: &str = "password";

const PLAIN_PREFIX: &str = "plain$";

/// Clock that only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Stores passwords as tagged plain text. Fast enough for HTTP tests where
/// bcrypt would dominate the run time.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextHasher;

#[async_trait]
impl PasswordHasher for PlainTextHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        Ok(PasswordHash::new(format!("{PLAIN_PREFIX}{password}")))
    }

    async fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        Ok(hash.as_str().strip_prefix(PLAIN_PREFIX) == Some(password))
    }
}

/// In-memory stores plus a controllable clock.
pub struct TestWorld {
    pub users: Arc<InMemoryUserRepository>,
    pub tickets: Arc<InMemoryTicketRepository>,
    pub clock: Arc<MutableClock>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Empty stores with the clock at 2024-05-01T09:00:00Z.
    pub fn new() -> Self {
        let start = match Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).single() {
            Some(start) => start,
            None => panic!("valid start timestamp"),
        };
        Self {
            users: Arc::new(InMemoryUserRepository::default()),
            tickets: Arc::new(InMemoryTicketRepository::new()),
            clock: Arc::new(MutableClock::new(start)),
        }
    }

    /// Store a user whose password is [`SEED_PASSWORD`].
    pub async fn seed_user(&self, username: &str, role: Role) -> User {
        let user = User::new(
            UserId::random(),
            Username::new(username).unwrap_or_else(|err| panic!("fixture username: {err}")),
            DisplayName::new(username).unwrap_or_else(|err| panic!("fixture name: {err}")),
            role,
            PasswordHash::new(format!("{PLAIN_PREFIX}{SEED_PASSWORD}")),
        );
        if let Err(err) = self.users.upsert(&user).await {
            panic!("seed user {username}: {err}");
        }
        user
    }

    /// Wire the real domain services over the in-memory stores.
    pub fn http_state(&self) -> HttpState {
        let accounts = Arc::new(UserAccountService::new(
            self.users.clone(),
            Arc::new(PlainTextHasher),
        ));
        let clock: Arc<dyn Clock> = self.clock.clone();
        let tickets = Arc::new(TicketService::new(
            self.tickets.clone(),
            self.users.clone(),
            clock,
        ));
        HttpState {
            login: accounts.clone(),
            identity: accounts.clone(),
            tickets: tickets.clone(),
            tickets_query: tickets,
            profile: accounts.clone(),
            profile_command: accounts,
        }
    }
}
