//! bcrypt implementation of the `PasswordHasher` port.

use async_trait::async_trait;
use tracing::warn;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Cost used when none is configured.
pub const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// Hashes passwords with bcrypt on the blocking thread pool.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the given work factor, clamped to bcrypt's
    /// accepted range.
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

fn join_error(err: tokio::task::JoinError) -> PasswordHashError {
    PasswordHashError::hashing(format!("hashing task failed: {err}"))
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let cost = self.cost;
        tokio::task::spawn_blocking(move || {
            bcrypt::hash(password.as_bytes(), cost)
                .map(PasswordHash::new)
                .map_err(|err| PasswordHashError::hashing(err.to_string()))
        })
        .await
        .map_err(join_error)?
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let hash = hash.as_str().to_owned();
        tokio::task::spawn_blocking(move || match bcrypt::verify(password.as_bytes(), &hash) {
            Ok(matches) => Ok(matches),
            Err(
                bcrypt::BcryptError::InvalidHash(_)
                | bcrypt::BcryptError::InvalidPrefix(_)
                | bcrypt::BcryptError::InvalidBase64(_),
            ) => {
                // A corrupt stored hash never matches.
                warn!("stored password hash is malformed");
                Ok(false)
            }
            Err(err) => Err(PasswordHashError::hashing(err.to_string())),
        })
        .await
        .map_err(join_error)?
    }
}
