//! Site account model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use dem_claire_core::{Email, UserId};

/// A registered account. The password hash lives only in the repository
/// layer and never leaves it.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Email,
    /// Cosmetic sync percentage, nudged on every status read.
    pub consciousness_sync: f64,
    pub neural_level: i32,
    pub last_sync: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// The slice of a user returned by the auth endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub consciousness_sync: f64,
    pub neural_level: i32,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            consciousness_sync: user.consciousness_sync,
            neural_level: user.neural_level,
        }
    }
}
