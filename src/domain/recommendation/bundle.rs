//! The assembled recommendation bundle stored on a session.

use serde::{Deserialize, Serialize};

use super::{ContentRecommendation, LifestyleRecommendation, SessionAnalysis};
use crate::domain::foundation::Timestamp;

/// Complete recommendation output for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationBundle {
    pub session_analysis: SessionAnalysis,
    pub content_recommendations: Vec<ContentRecommendation>,
    pub lifestyle_recommendations: Vec<LifestyleRecommendation>,
    pub recommendation_metadata: RecommendationMetadata,
}

/// Summary metadata attached to every bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationMetadata {
    pub generated_at: Timestamp,
    pub session_themes: Vec<String>,
    pub primary_focus: Vec<String>,
    pub motivation_level: String,
}

impl RecommendationBundle {
    /// Assembles a bundle, deriving the metadata from the analysis.
    pub fn assemble(
        session_analysis: SessionAnalysis,
        content_recommendations: Vec<ContentRecommendation>,
        lifestyle_recommendations: Vec<LifestyleRecommendation>,
    ) -> Self {
        let recommendation_metadata = RecommendationMetadata {
            generated_at: Timestamp::now(),
            session_themes: session_analysis.therapeutic_themes.clone(),
            primary_focus: session_analysis.primary_symptoms.clone(),
            motivation_level: session_analysis.motivation_level.clone(),
        };

        Self {
            session_analysis,
            content_recommendations,
            lifestyle_recommendations,
            recommendation_metadata,
        }
    }
}
