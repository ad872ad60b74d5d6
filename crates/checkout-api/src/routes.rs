//! # Routes
//!
//! Axum router configuration for the checkout server.

use crate::handlers;
use crate::pages;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router
///
/// Routes:
/// - Pages:
///   - GET /          - Landing page
///   - GET /checkout  - Card form
///   - GET /success   - Success page (only when coming from /checkout)
///
/// - API:
///   - POST /api/payment - Create and confirm a payment (any other method,
///     OPTIONS included: 405)
///   - GET  /health      - Health check
///
/// The checkout page posts from the same origin, so no CORS layer is
/// installed; it would answer OPTIONS itself instead of the 405 fallback.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new().route(
        "/payment",
        post(handlers::submit_payment).fallback(handlers::method_not_allowed),
    );

    Router::new()
        .route("/", get(pages::landing))
        .route("/checkout", get(pages::checkout))
        .route("/success", get(pages::success))
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
