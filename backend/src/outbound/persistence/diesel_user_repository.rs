//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserRepository, UserStoreError};
use crate::domain::{EmailAddress, PasswordHash, User, UserId, Username};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the identity store port.
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

fn map_pool_error(error: PoolError) -> UserStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserStoreError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserStoreError::duplicate_identity()
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserStoreError::connection("database connection error")
        }
        _ => UserStoreError::query("database error"),
    }
}

/// Convert a database row into a validated domain user.
fn row_to_user(row: UserRow) -> Result<User, UserStoreError> {
    let username = Username::new(row.username)
        .map_err(|err| UserStoreError::query(format!("corrupted username in database: {err}")))?;
    let email = EmailAddress::new(row.email)
        .map_err(|err| UserStoreError::query(format!("corrupted email in database: {err}")))?;
    Ok(User::new(
        UserId::from_uuid(row.id),
        username,
        email,
        PasswordHash::from_phc(row.password_hash),
        row.created_at,
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            email: user.email().as_ref(),
            password_hash: user.password_hash().as_str(),
            created_at: user.created_at(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn unique_violation_maps_to_duplicate_identity() {
        let err = map_diesel_error(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value".to_owned()),
        ));
        assert_eq!(err, UserStoreError::duplicate_identity());
    }

    #[test]
    fn other_database_errors_map_to_query() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, UserStoreError::Query { .. }));
    }

    #[test]
    fn rows_with_invalid_email_surface_as_query_errors() {
        let row = UserRow {
            id: Uuid::new_v4(),
            username: "ada".into(),
            email: "not-an-email".into(),
            password_hash: "$argon2id$stub".into(),
            created_at: Utc::now(),
        };
        assert!(matches!(
            row_to_user(row),
            Err(UserStoreError::Query { .. })
        ));
    }

    #[test]
    fn valid_rows_convert_to_domain_users() {
        let id = Uuid::new_v4();
        let row = UserRow {
            id,
            username: "ada".into(),
            email: "ada@example.com".into(),
            password_hash: "$argon2id$stub".into(),
            created_at: Utc::now(),
        };
        let user = row_to_user(row).expect("valid row converts");
        assert_eq!(*user.id().as_uuid(), id);
        assert_eq!(user.email().as_ref(), "ada@example.com");
    }
}
