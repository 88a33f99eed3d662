//! Contact message model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use dem_claire_core::MessageId;

/// A stored contact form submission.
#[derive(Debug, Clone, Serialize)]
pub struct ContactMessage {
    pub id: MessageId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Server-generated `NS_`-prefixed receipt token.
    pub neural_signature: String,
    pub created_at: DateTime<Utc>,
}
