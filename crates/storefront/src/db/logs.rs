//! Neural action log repository.
//!
//! Append-only audit trail of auth actions. Log writes must never fail a
//! login, so callers record errors and move on.

use sqlx::PgPool;

use dem_claire_core::UserId;

use super::RepositoryError;

/// The auth actions the storefront records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeuralAction {
    Login,
    Register,
    SyncUpdate,
}

impl NeuralAction {
    /// Wire name, as stored in the `action` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "NEURAL_LOGIN",
            Self::Register => "NEURAL_REGISTER",
            Self::SyncUpdate => "SYNC_UPDATE",
        }
    }
}

/// Request metadata attached to every log row.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Repository for the `neural_logs` table.
pub struct LogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LogRepository<'a> {
    /// Create a new log repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append a log row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn append(
        &self,
        user_id: UserId,
        action: NeuralAction,
        neural_data: &serde_json::Value,
        meta: &RequestMeta,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO neural_logs (user_id, action, neural_data, ip_address, user_agent)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(user_id.as_i64())
        .bind(action.as_str())
        .bind(neural_data)
        .bind(meta.ip_address.as_deref().unwrap_or("unknown"))
        .bind(meta.user_agent.as_deref().unwrap_or("unknown"))
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
