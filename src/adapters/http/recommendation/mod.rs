//! Recommendation HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::RecommendationHandlers;
pub use routes::recommendation_routes;
