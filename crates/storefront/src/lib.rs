//! Dem Claire storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, middleware::from_fn, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the full application router over the given state.
///
/// Middleware order matters: Sentry layers wrap everything, then
/// tracing, request IDs, and CORS.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/health/ready", get(routes::ready))
        .route("/neural-status", get(routes::status::show))
        .route("/checkout", axum::routing::post(routes::checkout::place_order))
        .nest("/products", routes::product_routes())
        .nest("/cart", routes::cart_routes())
        .nest("/neural-auth", routes::auth_routes())
        .nest("/contact", routes::contact_routes())
        .method_not_allowed_fallback(routes::method_not_allowed)
        .fallback(routes::not_found)
        .layer(from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        // The frontend is served from a different origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
