//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod payload;
pub mod routes;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub use routes::{create_router, SharedLedger};

/// Build the application router: `/health` plus the ledger API under `/v1`
pub fn build_app(ledger: SharedLedger) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/v1", create_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(middleware::logging_middleware)),
        )
        .with_state(ledger)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
