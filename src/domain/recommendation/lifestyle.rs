//! Lifestyle activity recommendations.

use serde::{Deserialize, Serialize};

use super::SessionAnalysis;

/// A recommended wellness activity tied to the treatment plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifestyleRecommendation {
    pub title: String,
    pub description: String,
    pub activity_type: String,
    pub instructions: String,
    pub frequency: String,
    pub duration: String,
    pub difficulty_level: String,
    #[serde(default)]
    pub relates_to_goal: Option<String>,
    #[serde(default)]
    pub relates_to_homework: Option<String>,
}

impl LifestyleRecommendation {
    /// Deterministic recommendations: a daily walk for everyone, plus
    /// progressive muscle relaxation when anxiety was analyzed.
    pub fn fallback_set(analysis: &SessionAnalysis) -> Vec<Self> {
        let mut recommendations = vec![Self {
            title: "Daily Morning Walk".to_string(),
            description: "Start your day with gentle physical activity and fresh air".to_string(),
            activity_type: "physical".to_string(),
            instructions: "Take a 15-20 minute walk outside, preferably in nature or a pleasant neighborhood. Focus on your surroundings and breathe deeply.".to_string(),
            frequency: "daily".to_string(),
            duration: "15-20 minutes".to_string(),
            difficulty_level: "beginner".to_string(),
            relates_to_goal: Some("General wellness and mood improvement".to_string()),
            relates_to_homework: None,
        }];

        if analysis.mentions_symptom("anxiety") {
            recommendations.push(Self {
                title: "Progressive Muscle Relaxation".to_string(),
                description: "Learn to release physical tension associated with anxiety".to_string(),
                activity_type: "mental".to_string(),
                instructions: "Find a quiet space. Tense and then relax each muscle group starting from your toes and working up to your head.".to_string(),
                frequency: "daily".to_string(),
                duration: "10-15 minutes".to_string(),
                difficulty_level: "beginner".to_string(),
                relates_to_goal: None,
                relates_to_homework: Some("Anxiety management practice".to_string()),
            });
        }

        recommendations
    }
}
