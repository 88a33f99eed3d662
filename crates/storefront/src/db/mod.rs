//! Database operations for the storefront `PostgreSQL`.
//!
//! # Tables
//!
//! - `products` - The catalog
//! - `neural_cart` - Persisted cart lines, keyed by user and product
//! - `neural_users` - Site accounts with consciousness sync values
//! - `contact_messages` - Contact form submissions
//! - `neural_logs` - Append-only audit trail of auth actions
//!
//! All queries are runtime-checked (`sqlx::query_as` / `sqlx::query` with
//! `.bind()`), so the crate builds without a live database.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p dem-claire-cli -- migrate
//! ```

pub mod cart;
pub mod contact;
pub mod logs;
pub mod products;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors that can occur in repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
