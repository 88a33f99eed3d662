//! Neural authentication service.
//!
//! Password registration and login over the `neural_users` table, with an
//! append-only action log. Hashing is delegated to Argon2id; the opaque
//! session token is minted in [`crate::services::tokens`].

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use rand::Rng;
use serde_json::json;
use sqlx::PgPool;

use dem_claire_core::{Email, UserId};

use crate::db::RepositoryError;
use crate::db::logs::{LogRepository, NeuralAction, RequestMeta};
use crate::db::users::UserRepository;
use crate::models::user::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Bounds for the randomized sync a fresh account starts with.
const INITIAL_SYNC_RANGE: std::ops::Range<f64> = 80.0..95.0;

/// Bounds the per-read sync fluctuation is clamped to.
const SYNC_MIN: f64 = 75.0;
const SYNC_MAX: f64 = 99.9;

/// Authentication service.
///
/// Handles registration, login, and consciousness sync bookkeeping.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    logs: LogRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
            logs: LogRepository::new(pool),
        }
    }

    /// Register a new account.
    ///
    /// The initial consciousness sync is randomized within
    /// [`INITIAL_SYNC_RANGE`].
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password is too short.
    /// Returns `AuthError::UserAlreadyExists` on a duplicate email/username.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        meta: &RequestMeta,
    ) -> Result<UserId, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        let neural_hash = hash_password(password)?;

        let initial_sync = rand::rng().random_range(INITIAL_SYNC_RANGE);

        let user_id = self
            .users
            .create(username, &email, &neural_hash, initial_sync)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        self.log(user_id, NeuralAction::Register, json!({ "initial_sync": true }), meta)
            .await;

        Ok(user_id)
    }

    /// Log in with email and password.
    ///
    /// Stamps `last_sync` and appends a log row on success.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        meta: &RequestMeta,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        let (user, neural_hash) = self
            .users
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &neural_hash)?;

        self.users.touch_last_sync(user.id).await?;

        self.log(
            user.id,
            NeuralAction::Login,
            json!({
                "consciousness_sync": user.consciousness_sync,
                "neural_level": user.neural_level,
            }),
            meta,
        )
        .await;

        Ok(user)
    }

    /// Replace a user's consciousness sync value.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the user does not exist.
    pub async fn update_sync(
        &self,
        user_id: UserId,
        sync: f64,
        meta: &RequestMeta,
    ) -> Result<f64, AuthError> {
        let clamped = sync.clamp(SYNC_MIN, SYNC_MAX);

        self.users
            .update_sync(user_id, clamped)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => AuthError::UserNotFound,
                other => AuthError::Repository(other),
            })?;

        self.log(
            user_id,
            NeuralAction::SyncUpdate,
            json!({ "new_sync": clamped }),
            meta,
        )
        .await;

        Ok(clamped)
    }

    /// A user's current status with the display fluctuation applied:
    /// the stored sync nudged by at most ±1.0 and clamped to
    /// `[75.0, 99.9]`. The stored value is not written back.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the user does not exist.
    pub async fn status(&self, user_id: UserId) -> Result<User, AuthError> {
        let mut user = self
            .users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let jitter = rand::rng().random_range(-1.0..=1.0);
        user.consciousness_sync = (user.consciousness_sync + jitter).clamp(SYNC_MIN, SYNC_MAX);

        Ok(user)
    }

    /// Append an action log row. Log failures are recorded at warn level
    /// and swallowed: an audit miss must not fail a login.
    async fn log(
        &self,
        user_id: UserId,
        action: NeuralAction,
        data: serde_json::Value,
        meta: &RequestMeta,
    ) {
        if let Err(e) = self.logs.append(user_id, action, &data, meta).await {
            tracing::warn!(user_id = %user_id, action = action.as_str(), error = %e, "Failed to append neural log");
        }
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn password_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).is_ok());
        assert!(verify_password("wrong password", &hash).is_err());
    }

    #[test]
    fn short_password_is_rejected() {
        assert!(matches!(
            validate_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(validate_password("long enough").is_ok());
    }
}
