//! `UserRepository` held in process memory.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, Username};

/// User store backed by a mutex-guarded map. Usernames stay unique.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Create a store pre-populated with `users`.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: Mutex::new(users.into_iter().map(|user| (*user.id(), user)).collect()),
        }
    }

    /// Remove a user, leaving their tickets in place.
    pub fn remove(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        Ok(self.guard()?.remove(id).is_some())
    }

    fn guard(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<UserId, User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn upsert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.guard()?;
        let taken = users
            .values()
            .any(|other| other.username() == user.username() && other.id() != user.id());
        if taken {
            return Err(UserPersistenceError::query("username already taken"));
        }
        users.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.guard()?.get(id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .guard()?
            .values()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        let users = self.guard()?;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::{employee, manager};
    use crate::domain::{DisplayName, Role};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn lookups_by_id_and_username() {
        let alice = employee("alice");
        let store = InMemoryUserRepository::with_users([alice.clone(), manager(Role::Hr)]);

        assert_eq!(store.find_by_id(alice.id()).await.expect("lookup"), Some(alice.clone()));
        assert_eq!(
            store
                .find_by_username(alice.username())
                .await
                .expect("lookup"),
            Some(alice)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn upsert_replaces_profile_fields() {
        let alice = employee("alice");
        let store = InMemoryUserRepository::with_users([alice.clone()]);
        let renamed = alice
            .clone()
            .with_name(DisplayName::new("Alice Cooper").expect("name"));

        store.upsert(&renamed).await.expect("upsert");

        let stored = store.find_by_id(alice.id()).await.expect("lookup");
        assert_eq!(stored.map(|user| user.name().to_string()), Some("Alice Cooper".to_owned()));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_usernames_are_rejected() {
        let store = InMemoryUserRepository::with_users([employee("alice")]);
        let err = store.upsert(&employee("alice")).await.expect_err("taken");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn batch_lookup_skips_unknown_ids() {
        let alice = employee("alice");
        let store = InMemoryUserRepository::with_users([alice.clone()]);
        let found = store
            .find_by_ids(&[*alice.id(), UserId::random()])
            .await
            .expect("lookup");
        assert_eq!(found, vec![alice]);
    }
}
