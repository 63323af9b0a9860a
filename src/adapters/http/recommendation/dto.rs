//! HTTP DTOs for recommendation endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{DEFAULT_CONTENT_COUNT, DEFAULT_LIFESTYLE_COUNT};
use crate::domain::foundation::Timestamp;
use crate::domain::recommendation::{
    ContentRecommendation, LifestyleRecommendation, RecommendationBundle, SessionAnalysis,
};

fn default_content_count() -> usize {
    DEFAULT_CONTENT_COUNT
}

fn default_lifestyle_count() -> usize {
    DEFAULT_LIFESTYLE_COUNT
}

/// Request body for full recommendation generation.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default = "default_content_count")]
    pub content_count: usize,
    #[serde(default = "default_lifestyle_count")]
    pub lifestyle_count: usize,
}

impl Default for RecommendationRequest {
    fn default() -> Self {
        Self {
            content_count: DEFAULT_CONTENT_COUNT,
            lifestyle_count: DEFAULT_LIFESTYLE_COUNT,
        }
    }
}

/// Response for full recommendation generation.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub session_id: i64,
    pub patient_name: String,
    pub recommendations: RecommendationBundle,
    pub generated_at: Timestamp,
}

/// Query parameter for the single-set generation endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct CountQuery {
    pub count: Option<usize>,
}

/// Response for keyword extraction.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordsResponse {
    pub session_id: i64,
    pub analysis: SessionAnalysis,
    pub conversation_length: usize,
    pub analyzed_at: Timestamp,
}

/// Response for content-only generation.
#[derive(Debug, Clone, Serialize)]
pub struct ContentRecommendationsResponse {
    pub session_id: i64,
    pub content_recommendations: Vec<ContentRecommendation>,
    pub session_themes: Vec<String>,
    pub primary_symptoms: Vec<String>,
}

/// Response for lifestyle-only generation.
#[derive(Debug, Clone, Serialize)]
pub struct LifestyleRecommendationsResponse {
    pub session_id: i64,
    pub lifestyle_recommendations: Vec<LifestyleRecommendation>,
    pub active_goals: usize,
    pub recent_homework: usize,
    pub motivation_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommendation_request_defaults_counts() {
        let req: RecommendationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.content_count, 5);
        assert_eq!(req.lifestyle_count, 6);
    }

    #[test]
    fn recommendation_request_accepts_overrides() {
        let req: RecommendationRequest =
            serde_json::from_str(r#"{"content_count": 2, "lifestyle_count": 3}"#).unwrap();
        assert_eq!(req.content_count, 2);
        assert_eq!(req.lifestyle_count, 3);
    }
}
