//! Account service: login, identity resolution, and profile self-service.
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    IdentityResolver, LoginService, PasswordHashError, PasswordHasher, ProfileCommand,
    ProfileQuery, UserRepository,
};
use crate::domain::ticket_service::map_user_repository_error;
use crate::domain::{
    Error, LoginCredentials, ProfileUpdate, ProfileValidationError, User, UserId, Username,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// User account service over a user store and a password hasher.
#[derive(Clone)]
pub struct UserAccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> UserAccountService<U, H> {
    /// Create a service over the given user store and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(format!("password hashing failed: {error}"))
}

fn map_profile_error(error: &ProfileValidationError) -> Error {
    Error::invalid_request(error.to_string())
        .with_details(json!({ "field": error.field(), "code": error.code() }))
}

#[async_trait]
impl<U, H> LoginService for UserAccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let username = Username::new(credentials.username())
            .map_err(|_| Error::unauthorized(INVALID_CREDENTIALS))?;
        let Some(user) = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_repository_error)?
        else {
            debug!(%username, "login rejected: unknown user");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let verified = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
            .map_err(map_hash_error)?;
        if !verified {
            debug!(user_id = %user.id(), "login rejected: wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        info!(user_id = %user.id(), role = %user.role(), "user logged in");
        Ok(user)
    }
}

#[async_trait]
impl<U, H> IdentityResolver for UserAccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn resolve(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| {
                warn!(%user_id, "session refers to a user that no longer exists");
                Error::unauthorized("login required")
            })
    }
}

#[async_trait]
impl<U, H> ProfileQuery for UserAccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.resolve(user_id).await
    }
}

#[async_trait]
impl<U, H> ProfileCommand for UserAccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn update_profile(&self, actor: &User, update: ProfileUpdate) -> Result<User, Error> {
        let mut updated = actor.clone().with_name(update.name().clone());
        if let Some(change) = update.password_change() {
            let verified = self
                .hasher
                .verify(change.current(), actor.password_hash())
                .await
                .map_err(map_hash_error)?;
            if !verified {
                return Err(map_profile_error(
                    &ProfileValidationError::IncorrectCurrentPassword,
                ));
            }
            let hash = self
                .hasher
                .hash(change.new_password())
                .await
                .map_err(map_hash_error)?;
            updated = updated.with_password_hash(hash);
            info!(user_id = %actor.id(), "password changed");
        }
        self.users
            .upsert(&updated)
            .await
            .map_err(map_user_repository_error)?;
        Ok(updated)
    }
}
