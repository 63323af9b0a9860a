//! Educational and therapeutic content recommendations.

use serde::{Deserialize, Serialize};

use super::SessionAnalysis;

/// A single piece of recommended content (video, article, podcast, app).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecommendation {
    pub title: String,
    pub description: String,
    pub content_type: String,
    pub search_query: String,
    pub relevance_reason: String,
    pub estimated_duration: String,
}

impl ContentRecommendation {
    /// Deterministic recommendations keyed off the analyzed symptoms.
    /// Anxiety and depression each contribute one item; anything else
    /// yields an empty list.
    pub fn fallback_set(analysis: &SessionAnalysis) -> Vec<Self> {
        let mut recommendations = Vec::new();

        if analysis.mentions_symptom("anxiety") {
            recommendations.push(Self {
                title: "Guided Breathing Exercises for Anxiety".to_string(),
                description: "Learn breathing techniques to manage anxiety symptoms".to_string(),
                content_type: "youtube".to_string(),
                search_query: "guided breathing exercises anxiety relief".to_string(),
                relevance_reason: "Addresses anxiety symptoms mentioned in session".to_string(),
                estimated_duration: "10-15 minutes".to_string(),
            });
        }

        if analysis.mentions_symptom("depression") {
            recommendations.push(Self {
                title: "Understanding Depression: Psychology Explained".to_string(),
                description: "Educational content about depression and recovery".to_string(),
                content_type: "youtube".to_string(),
                search_query: "depression psychology education recovery".to_string(),
                relevance_reason: "Provides psychoeducation about depression".to_string(),
                estimated_duration: "20-30 minutes".to_string(),
            });
        }

        recommendations
    }
}
