//! Neural authentication JSON endpoints.
//!
//! Login, registration, and sync updates share one POST with an
//! `action` query parameter; the frontend depends on that wire shape.

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
};
use rand::Rng;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use dem_claire_core::UserId;

use crate::db::logs::RequestMeta;
use crate::error::{AppError, Result};
use crate::models::user::UserSummary;
use crate::services::{AuthService, tokens};
use crate::state::AppState;

/// Query parameters for the auth action dispatch.
#[derive(Debug, Deserialize)]
pub struct ActionParams {
    pub action: Option<String>,
}

/// Body accepted by every auth action; each action reads the fields it
/// needs and ignores the rest.
#[derive(Debug, Deserialize)]
pub struct AuthBody {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub user_id: Option<i64>,
    pub consciousness_sync: Option<f64>,
}

/// Dispatch an auth action.
///
/// POST /neural-auth?action=login|register|sync
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a missing or unknown action.
#[instrument(skip(state, headers, body), fields(action = params.action.as_deref().unwrap_or("")))]
pub async fn dispatch(
    State(state): State<AppState>,
    Query(params): Query<ActionParams>,
    headers: HeaderMap,
    Json(body): Json<AuthBody>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let meta = request_meta(&headers);
    let auth = AuthService::new(state.pool());

    match params.action.as_deref() {
        Some("login") => login(&auth, body, &meta).await,
        Some("register") => register(&auth, body, &meta).await,
        Some("sync") => sync(&auth, body, &meta).await,
        _ => Err(AppError::BadRequest("Invalid action".to_string())),
    }
}

async fn login(
    auth: &AuthService<'_>,
    body: AuthBody,
    meta: &RequestMeta,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let user = auth.login(&body.email, &body.password, meta).await?;
    let neural_token = tokens::mint_neural_token(user.id);

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "user": UserSummary::from(&user),
            "neural_token": neural_token,
        })),
    ))
}

async fn register(
    auth: &AuthService<'_>,
    body: AuthBody,
    meta: &RequestMeta,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    if body.username.trim().is_empty() {
        return Err(AppError::BadRequest("Username required".to_string()));
    }

    let user_id = auth
        .register(&body.username, &body.email, &body.password, meta)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Neural link established",
            "user_id": user_id,
        })),
    ))
}

async fn sync(
    auth: &AuthService<'_>,
    body: AuthBody,
    meta: &RequestMeta,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let user_id = body
        .user_id
        .map(UserId::new)
        .ok_or_else(|| AppError::BadRequest("User ID required".to_string()))?;
    let sync = body
        .consciousness_sync
        .ok_or_else(|| AppError::BadRequest("Sync value required".to_string()))?;

    let new_sync = auth.update_sync(user_id, sync, meta).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "new_sync": new_sync })),
    ))
}

/// Query parameters for the status read.
#[derive(Debug, Deserialize)]
pub struct StatusParams {
    pub user_id: Option<i64>,
}

/// A user's live neural status.
///
/// GET /neural-auth?user_id=N
///
/// The stored sync comes back nudged by a fresh fluctuation; the
/// synaptic connection count is sampled per request.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown user.
#[instrument(skip(state))]
pub async fn status(
    State(state): State<AppState>,
    Query(params): Query<StatusParams>,
) -> Result<Json<serde_json::Value>> {
    let user_id = params
        .user_id
        .map(UserId::new)
        .ok_or_else(|| AppError::BadRequest("User ID required".to_string()))?;

    let user = AuthService::new(state.pool())
        .status(user_id)
        .await
        .map_err(|e| match e {
            crate::services::auth::AuthError::UserNotFound => {
                AppError::NotFound("Neural signature not found".to_string())
            }
            other => AppError::Auth(other),
        })?;

    let synaptic_connections: u32 = rand::rng().random_range(800..=1200);

    Ok(Json(json!({
        "neural_status": "ACTIVE",
        "consciousness_sync": (user.consciousness_sync * 10.0).round() / 10.0,
        "neural_level": user.neural_level,
        "last_sync": user.last_sync,
        "synaptic_connections": synaptic_connections,
    })))
}

/// Pull client metadata out of the request headers for the action log.
fn request_meta(headers: &HeaderMap) -> RequestMeta {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };

    RequestMeta {
        ip_address: header("x-forwarded-for")
            .map(|raw| raw.split(',').next().unwrap_or(&raw).trim().to_string()),
        user_agent: header("user-agent"),
    }
}
