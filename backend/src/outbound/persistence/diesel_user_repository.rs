//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{DisplayName, PasswordHash, Role, User, UserId, Username};

use super::error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewUserRow, UserProfileUpdate, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Convert a row into a domain user, rejecting rows that break the
/// role/department binding.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        username,
        password_hash,
        name,
        role,
        department,
    } = row;
    let invalid = |err: crate::domain::UserValidationError| {
        warn!(user_id = %id, error = %err, "stored user row is invalid");
        UserPersistenceError::query(format!("invalid user row {id}: {err}"))
    };
    let role = role.parse::<Role>().map_err(invalid)?;
    User::from_stored(
        UserId::from_uuid(id),
        Username::new(&username).map_err(invalid)?,
        DisplayName::new(&name).map_err(invalid)?,
        role,
        department.as_deref(),
        PasswordHash::new(password_hash),
    )
    .map_err(invalid)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn upsert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            password_hash: user.password_hash().as_str(),
            name: user.name().as_ref(),
            role: user.role().as_str(),
            department: user.department().map(|department| department.as_str()),
        };
        let update = UserProfileUpdate {
            name: user.name().as_ref(),
            password_hash: user.password_hash().as_str(),
            updated_at: chrono::Utc::now(),
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .on_conflict(users::id)
            .do_update()
            .set(&update)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(uuids))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_user).collect()
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::Department;

    #[fixture]
    fn manager_row() -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            username: "finance.manager".to_owned(),
            password_hash: "$2b$12$hash".to_owned(),
            name: "Fiona".to_owned(),
            role: "FINANCE".to_owned(),
            department: Some("FINANCE".to_owned()),
        }
    }

    #[rstest]
    fn manager_rows_convert(manager_row: UserRow) {
        let user = row_to_user(manager_row).expect("valid row");
        assert_eq!(user.role(), Role::Finance);
        assert_eq!(user.department(), Some(Department::Finance));
    }

    #[rstest]
    #[case(Some("HR"))]
    #[case(None)]
    fn mismatched_department_is_rejected(
        mut manager_row: UserRow,
        #[case] department: Option<&str>,
    ) {
        manager_row.department = department.map(str::to_owned);
        let err = row_to_user(manager_row).expect_err("binding broken");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn unknown_roles_are_rejected(mut manager_row: UserRow) {
        manager_row.role = "SUPERUSER".to_owned();
        assert!(row_to_user(manager_row).is_err());
    }
}
