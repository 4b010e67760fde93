//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `HELPDESK_*` environment variables, or a
//! configuration file. Accessors supply the defaults.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;
use crate::outbound::security::DEFAULT_BCRYPT_COST;

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8080);
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;

/// Settings that cannot be defaulted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// No database URL was supplied.
    #[error("database URL is required (set HELPDESK_DATABASE_URL or --database-url)")]
    MissingDatabaseUrl,
}

/// Server, database, and hashing settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HELPDESK")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_connection_timeout_secs: Option<u64>,
    /// bcrypt work factor for new password hashes.
    pub bcrypt_cost: Option<u32>,
    /// Apply pending migrations at startup.
    pub run_migrations: Option<bool>,
}

impl AppSettings {
    /// Bind address, `0.0.0.0:8080` unless configured.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from(DEFAULT_BIND_ADDR))
    }

    /// # Errors
    ///
    /// [`SettingsError::MissingDatabaseUrl`] when no URL was configured.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// bcrypt work factor, 12 unless configured.
    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST)
    }

    /// Whether to apply pending migrations at startup; on unless disabled.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Pool settings for the configured database.
    ///
    /// # Errors
    ///
    /// [`SettingsError::MissingDatabaseUrl`] when no URL was configured.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
            .with_connection_timeout(Duration::from_secs(
                self.pool_connection_timeout_secs
                    .unwrap_or(DEFAULT_POOL_TIMEOUT_SECS),
            )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "HELPDESK_BIND_ADDR",
        "HELPDESK_DATABASE_URL",
        "HELPDESK_POOL_MAX_SIZE",
        "HELPDESK_POOL_CONNECTION_TIMEOUT_SECS",
        "HELPDESK_BCRYPT_COST",
        "HELPDESK_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("helpdesk")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(settings.bind_addr(), SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(settings.bcrypt_cost(), DEFAULT_BCRYPT_COST);
        assert!(settings.run_migrations());
        assert_eq!(
            settings.database_url(),
            Err(SettingsError::MissingDatabaseUrl)
        );
        assert!(settings.pool_config().is_err());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("HELPDESK_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "HELPDESK_DATABASE_URL",
                Some("postgres://helpdesk@localhost/helpdesk".to_owned()),
            ),
            ("HELPDESK_POOL_MAX_SIZE", Some("4".to_owned())),
            ("HELPDESK_POOL_CONNECTION_TIMEOUT_SECS", Some("5".to_owned())),
            ("HELPDESK_BCRYPT_COST", Some("10".to_owned())),
            ("HELPDESK_RUN_MIGRATIONS", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(settings.bind_addr(), SocketAddr::from(([127, 0, 0, 1], 9000)));
        assert_eq!(settings.bcrypt_cost(), 10);
        assert!(!settings.run_migrations());
        let pool = settings.pool_config().expect("database url set");
        assert_eq!(pool.database_url(), "postgres://helpdesk@localhost/helpdesk");
        assert_eq!(pool.max_size(), 4);
    }
}
