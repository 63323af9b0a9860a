//! HTTP routes for treatment goal and homework endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{complete_homework, update_goal_progress, TreatmentHandlers};

/// Creates the treatment router.
pub fn treatment_routes(handlers: TreatmentHandlers) -> Router {
    Router::new()
        .route("/homework/:id/complete", post(complete_homework))
        // GET kept for compatibility with existing clients.
        .route(
            "/goals/:id/progress",
            get(update_goal_progress).put(update_goal_progress),
        )
        .with_state(handlers)
}
