//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health          - Liveness check
//! GET    /health/ready    - Readiness check (pings the database)
//!
//! # Catalog
//! GET    /products        - Product listing (?category=, ?limit=, ?offset=)
//! POST   /products        - Create product
//! PUT    /products?id=N   - Update product
//! DELETE /products?id=N   - Delete product
//!
//! # Cart
//! GET    /cart?user_id=N  - Cart contents with totals
//! POST   /cart            - Add product (merges into an existing line)
//! PUT    /cart?id=N       - Replace line quantity
//! DELETE /cart?id=N       - Remove line
//!
//! # Checkout
//! POST   /checkout        - Place an order (server-side total)
//!
//! # Neural auth
//! POST   /neural-auth?action=login|register|sync
//! GET    /neural-auth?user_id=N - Live user status
//!
//! # Misc
//! POST   /contact         - Submit a contact message
//! GET    /contact         - Recent messages
//! GET    /neural-status   - Ambient sync reading
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod contact;
pub mod products;
pub mod status;

use axum::{
    Json,
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::json;

use crate::error::Result;
use crate::state::AppState;

/// Create the catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(products::list)
            .post(products::create)
            .put(products::update)
            .delete(products::delete),
    )
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(cart::show)
            .post(cart::add)
            .put(cart::update)
            .delete(cart::remove),
    )
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/", post(auth::dispatch).get(auth::status))
}

/// Create the contact routes router.
pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/", post(contact::submit).get(contact::recent))
}

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Readiness probe: verifies the database answers.
///
/// # Errors
///
/// Returns `AppError::Database` if the ping fails.
pub async fn ready(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    sqlx::query("SELECT 1")
        .execute(state.pool())
        .await
        .map_err(crate::db::RepositoryError::from)?;

    Ok(Json(json!({ "status": "ready" })))
}

/// JSON body for unmatched paths.
pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

/// JSON body for a known path hit with the wrong verb.
pub async fn method_not_allowed() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::Request;
    use secrecy::SecretString;
    use sqlx::PgPool;
    use tower::ServiceExt;

    use crate::config::{GatewayConfig, StorefrontConfig};
    use crate::state::AppState;

    use super::*;

    /// State over a lazy pool: no connection is made until a handler
    /// actually touches the database, so routing and dispatch errors can
    /// be exercised without Postgres running.
    fn test_state() -> AppState {
        let config = StorefrontConfig {
            database_url: SecretString::from("postgres://localhost/dem_claire_test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            gateway: GatewayConfig::default(),
            catalog_cache_ttl: Duration::from_secs(60),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.1,
        };
        let pool = PgPool::connect_lazy("postgres://localhost/dem_claire_test").unwrap();
        AppState::new(config, pool)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_auth_action_returns_400() {
        let app = crate::build_router(test_state());

        let request = Request::builder()
            .method("POST")
            .uri("/neural-auth?action=teleport")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Invalid action");
    }

    #[tokio::test]
    async fn test_missing_auth_action_returns_400() {
        let app = crate::build_router(test_state());

        let request = Request::builder()
            .method("POST")
            .uri("/neural-auth")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Invalid action");
    }

    #[tokio::test]
    async fn test_unknown_path_returns_json_404() {
        let app = crate::build_router(test_state());

        let request = Request::builder()
            .method("GET")
            .uri("/warp")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Not found");
    }

    #[tokio::test]
    async fn test_wrong_verb_returns_json_405() {
        let app = crate::build_router(test_state());

        let request = Request::builder()
            .method("GET")
            .uri("/checkout")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body_json(response).await["error"], "Method not allowed");
    }
}
