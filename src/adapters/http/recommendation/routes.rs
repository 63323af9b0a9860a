//! HTTP routes for recommendation endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    content_recommendations, extract_keywords, generate_recommendations,
    lifestyle_recommendations, RecommendationHandlers,
};

/// Creates the recommendation router.
pub fn recommendation_routes(handlers: RecommendationHandlers) -> Router {
    Router::new()
        .route("/sessions/:id/recommendations", post(generate_recommendations))
        .route("/sessions/:id/keywords", get(extract_keywords))
        .route(
            "/sessions/:id/content-recommendations",
            post(content_recommendations),
        )
        .route(
            "/sessions/:id/lifestyle-recommendations",
            post(lifestyle_recommendations),
        )
        .with_state(handlers)
}
