//! User repository for neural auth.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use dem_claire_core::{Email, UserId};

use super::RepositoryError;
use crate::models::user::User;

/// A `neural_users` row, including the password hash.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    neural_hash: String,
    consciousness_sync: f64,
    neural_level: i32,
    last_sync: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<(User, String), RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok((
            User {
                id: UserId::new(self.id),
                username: self.username,
                email,
                consciousness_sync: self.consciousness_sync,
                neural_level: self.neural_level,
                last_sync: self.last_sync,
                created_at: self.created_at,
            },
            self.neural_hash,
        ))
    }
}

const SELECT_USER: &str = r"
    SELECT id, username, email, neural_hash, consciousness_sync,
           neural_level, last_sync, created_at
    FROM neural_users
";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user and their password hash by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{SELECT_USER} WHERE email = $1"))
            .bind(email.as_str())
            .fetch_optional(self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Get a user by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{SELECT_USER} WHERE id = $1"))
            .bind(id.as_i64())
            .fetch_optional(self.pool)
            .await?;

        row.map(|r| r.into_user().map(|(user, _)| user)).transpose()
    }

    /// Create a new user with a hashed password and an initial sync value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email or username is
    /// already registered.
    pub async fn create(
        &self,
        username: &str,
        email: &Email,
        neural_hash: &str,
        initial_sync: f64,
    ) -> Result<UserId, RepositoryError> {
        let (id,): (i64,) = sqlx::query_as(
            r"
            INSERT INTO neural_users (username, email, neural_hash, consciousness_sync)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(username)
        .bind(email.as_str())
        .bind(neural_hash)
        .bind(initial_sync)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("neural signature already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(UserId::new(id))
    }

    /// Stamp the user's last sync time (on successful login).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user does not exist.
    pub async fn touch_last_sync(&self, id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE neural_users SET last_sync = NOW() WHERE id = $1")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Replace the user's consciousness sync value and stamp `last_sync`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user does not exist.
    pub async fn update_sync(&self, id: UserId, sync: f64) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE neural_users SET consciousness_sync = $1, last_sync = NOW() WHERE id = $2",
        )
        .bind(sync)
        .bind(id.as_i64())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
