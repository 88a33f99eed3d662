//! Contact form JSON endpoints.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use dem_claire_core::Email;

use crate::db::contact::ContactRepository;
use crate::error::{AppError, Result};
use crate::services::tokens;
use crate::state::AppState;

/// Contact form submission body.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// Submit a contact message.
///
/// POST /contact
///
/// Every accepted message gets a server-generated `NS_` signature that
/// is stored alongside it and echoed in the response.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if any field is blank or the email is
/// malformed.
#[instrument(skip(state, body), fields(subject = %body.subject))]
pub async fn submit(
    State(state): State<AppState>,
    Json(body): Json<ContactForm>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let all_present = [&body.name, &body.email, &body.message]
        .iter()
        .all(|field| !field.trim().is_empty());
    if !all_present {
        return Err(AppError::BadRequest("Required fields missing".to_string()));
    }

    let email = Email::parse(&body.email)
        .map_err(|_| AppError::BadRequest("Invalid email address".to_string()))?;

    // Subject is optional on the wire.
    let subject = if body.subject.trim().is_empty() {
        "Neural Contact"
    } else {
        body.subject.as_str()
    };

    let neural_signature = tokens::neural_signature();
    ContactRepository::new(state.pool())
        .create(&body.name, &email, subject, &body.message, &neural_signature)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Neural transmission received",
            "neural_signature": neural_signature,
        })),
    ))
}

/// Recent contact messages, newest first.
///
/// GET /contact
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
#[instrument(skip(state))]
pub async fn recent(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let messages = ContactRepository::new(state.pool()).recent().await?;

    Ok(Json(json!({
        "total": messages.len(),
        "messages": messages,
    })))
}
