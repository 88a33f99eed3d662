//! Contact message repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use dem_claire_core::{Email, MessageId};

use super::RepositoryError;
use crate::models::message::ContactMessage;

/// How many messages the listing returns, newest first.
const MESSAGE_PAGE_SIZE: i64 = 50;

#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: i64,
    name: String,
    email: String,
    subject: String,
    message: String,
    neural_signature: String,
    created_at: DateTime<Utc>,
}

impl From<MessageRow> for ContactMessage {
    fn from(row: MessageRow) -> Self {
        Self {
            id: MessageId::new(row.id),
            name: row.name,
            email: row.email,
            subject: row.subject,
            message: row.message,
            neural_signature: row.neural_signature,
            created_at: row.created_at,
        }
    }
}

/// Repository for contact message operations.
pub struct ContactRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new contact repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a contact message and return its id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        subject: &str,
        message: &str,
        neural_signature: &str,
    ) -> Result<MessageId, RepositoryError> {
        let (id,): (i64,) = sqlx::query_as(
            r"
            INSERT INTO contact_messages (name, email, subject, message, neural_signature)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            ",
        )
        .bind(name)
        .bind(email.as_str())
        .bind(subject)
        .bind(message)
        .bind(neural_signature)
        .fetch_one(self.pool)
        .await?;

        Ok(MessageId::new(id))
    }

    /// The newest messages, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent(&self) -> Result<Vec<ContactMessage>, RepositoryError> {
        let rows: Vec<MessageRow> = sqlx::query_as(
            r"
            SELECT id, name, email, subject, message, neural_signature, created_at
            FROM contact_messages
            ORDER BY created_at DESC
            LIMIT $1
            ",
        )
        .bind(MESSAGE_PAGE_SIZE)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ContactMessage::from).collect())
    }
}
