//! HTTP handlers for health and analytics endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::domain_error_response;
use crate::application::handlers::AnalyticsHandler;
use crate::domain::foundation::Timestamp;

use super::dto::{AnalyticsResponse, HealthResponse};

/// API version reported by the health probe.
const API_VERSION: &str = "2.0.0";

const FEATURES: [&str; 9] = [
    "Interactive AI Therapy Sessions",
    "Automated Assessment Conducting",
    "Dynamic Phase Transitions",
    "AI-Generated Treatment Plans",
    "Crisis Detection",
    "Session Transcripts",
    "Real-time WebSocket Chat",
    "Content & Lifestyle Recommendations",
    "Diagnosis Documentation",
];

#[derive(Clone)]
pub struct SystemHandlers {
    analytics_handler: Arc<AnalyticsHandler>,
}

impl SystemHandlers {
    pub fn new(analytics_handler: Arc<AnalyticsHandler>) -> Self {
        Self { analytics_handler }
    }
}

/// GET /health - Service health probe
pub async fn health_check() -> Response {
    let response = HealthResponse {
        status: "healthy",
        timestamp: Timestamp::now().to_rfc3339(),
        version: API_VERSION,
        features: FEATURES.to_vec(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /analytics - System-wide usage statistics
pub async fn get_analytics(State(handlers): State<SystemHandlers>) -> Response {
    match handlers.analytics_handler.handle().await {
        Ok(summary) => {
            let response: AnalyticsResponse = summary.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}
