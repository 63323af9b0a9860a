//! HTTP routes for system endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_analytics, health_check, SystemHandlers};

/// Creates the system router.
pub fn system_routes(handlers: SystemHandlers) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/analytics", get(get_analytics))
        .with_state(handlers)
}
