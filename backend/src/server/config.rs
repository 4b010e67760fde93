//! HTTP server configuration object.

use std::net::SocketAddr;

use helpdesk::inbound::http::session_config::SessionSettings;
use helpdesk::outbound::persistence::DbPool;

/// Everything `create_server` needs once settings are validated and the
/// pool is up.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) bcrypt_cost: u32,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            session,
            bind_addr,
            db_pool,
            bcrypt_cost: helpdesk::outbound::security::DEFAULT_BCRYPT_COST,
        }
    }

    /// Work factor for new password hashes.
    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}
