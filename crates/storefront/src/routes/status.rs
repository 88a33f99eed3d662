//! Ambient neural-status endpoint.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::services::SyncReading;
use crate::state::AppState;

/// The latest ambient sync reading.
///
/// GET /neural-status
///
/// Served straight from the monitor's watch channel; no database access.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<SyncReading> {
    Json(state.sync().reading())
}
