//! Session analysis extracted from a conversation transcript.

use serde::{Deserialize, Serialize};

const ANXIETY_INDICATORS: &[&str] = &["anxious", "worried", "panic", "fear", "nervous"];
const DEPRESSION_INDICATORS: &[&str] = &["depressed", "sad", "hopeless", "empty", "worthless"];
const SLEEP_INDICATORS: &[&str] = &["sleep", "insomnia", "tired", "exhausted"];
const WORK_INDICATORS: &[&str] = &["work", "job", "boss", "career", "stress"];

/// Thematic analysis of a session, either parsed from model output or
/// produced by the lexical fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionAnalysis {
    #[serde(default)]
    pub primary_symptoms: Vec<String>,
    #[serde(default)]
    pub secondary_concerns: Vec<String>,
    #[serde(default)]
    pub therapeutic_themes: Vec<String>,
    #[serde(default)]
    pub coping_challenges: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub learning_needs: Vec<String>,
    #[serde(default)]
    pub emotional_state: String,
    #[serde(default)]
    pub behavioral_patterns: Vec<String>,
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default = "default_motivation")]
    pub motivation_level: String,
    #[serde(default)]
    pub session_summary: String,
}

fn default_motivation() -> String {
    "medium".to_string()
}

impl SessionAnalysis {
    /// Deterministic analysis when model extraction fails.
    ///
    /// Primary symptoms and secondary concerns come from a simple keyword
    /// scan over the transcript; everything else is fixed.
    pub fn fallback(conversation_text: &str) -> Self {
        let lower = conversation_text.to_lowercase();

        let mut primary_symptoms = Vec::new();
        if ANXIETY_INDICATORS.iter().any(|w| lower.contains(w)) {
            primary_symptoms.push("anxiety".to_string());
        }
        if DEPRESSION_INDICATORS.iter().any(|w| lower.contains(w)) {
            primary_symptoms.push("depression".to_string());
        }

        let mut secondary_concerns = Vec::new();
        if SLEEP_INDICATORS.iter().any(|w| lower.contains(w)) {
            secondary_concerns.push("sleep_issues".to_string());
        }
        if WORK_INDICATORS.iter().any(|w| lower.contains(w)) {
            secondary_concerns.push("work_stress".to_string());
        }

        Self {
            primary_symptoms,
            secondary_concerns,
            therapeutic_themes: vec![
                "coping_strategies".to_string(),
                "emotional_regulation".to_string(),
            ],
            coping_challenges: vec!["managing_symptoms".to_string()],
            strengths: vec!["seeking_help".to_string()],
            learning_needs: vec!["symptom_management".to_string()],
            emotional_state: "seeking_support".to_string(),
            behavioral_patterns: vec!["avoidance".to_string()],
            triggers: vec!["identified_stressors".to_string()],
            motivation_level: "medium".to_string(),
            session_summary: "Patient discussing mental health concerns and seeking coping strategies."
                .to_string(),
        }
    }

    pub fn mentions_symptom(&self, symptom: &str) -> bool {
        self.primary_symptoms.iter().any(|s| s == symptom)
    }
}
