//! Lexical signal detection over patient utterances.
//!
//! Detection is purely lexical: case-insensitive substring matching against
//! fixed keyword tables. No model calls, no scoring, no stemming. The same
//! utterance always yields the same signals.

mod keywords;

use serde::{Deserialize, Serialize};

use keywords::{
    BEHAVIORAL_PATTERNS, COGNITIVE_PATTERNS, CRISIS_KEYWORDS, MOOD_INDICATORS, SYMPTOM_KEYWORDS,
};

/// Signals extracted from a single patient utterance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationSignals {
    /// Symptom group tags (anxiety, depression, sleep, social, work_stress).
    pub detected_symptoms: Vec<String>,

    /// Mood tags (low_mood, anxiety, irritability).
    pub mood_indicators: Vec<String>,

    /// Behavioral tags (avoidance, sleep_disturbance).
    pub behavioral_patterns: Vec<String>,

    /// Cognitive distortion tags (all_or_nothing_thinking, catastrophizing).
    pub cognitive_patterns: Vec<String>,
}

impl ConversationSignals {
    /// Returns true if no signals were detected.
    pub fn is_empty(&self) -> bool {
        self.detected_symptoms.is_empty()
            && self.mood_indicators.is_empty()
            && self.behavioral_patterns.is_empty()
            && self.cognitive_patterns.is_empty()
    }
}

/// Analyzes a patient utterance for therapeutic signals.
///
/// Each group tag appears at most once per utterance, in table order.
pub fn analyze_utterance(text: &str) -> ConversationSignals {
    let lower = text.to_lowercase();

    let mut signals = ConversationSignals::default();

    for (group, keywords) in SYMPTOM_KEYWORDS {
        if contains_any(&lower, keywords) {
            signals.detected_symptoms.push((*group).to_string());
        }
    }

    for (indicator, keywords) in MOOD_INDICATORS {
        if contains_any(&lower, keywords) {
            signals.mood_indicators.push((*indicator).to_string());
        }
    }

    for (pattern, keywords) in BEHAVIORAL_PATTERNS {
        if contains_any(&lower, keywords) {
            signals.behavioral_patterns.push((*pattern).to_string());
        }
    }

    for (pattern, keywords) in COGNITIVE_PATTERNS {
        if contains_any(&lower, keywords) {
            signals.cognitive_patterns.push((*pattern).to_string());
        }
    }

    signals
}

/// Checks a patient utterance for crisis language.
pub fn detect_crisis(text: &str) -> bool {
    let lower = text.to_lowercase();
    contains_any(&lower, CRISIS_KEYWORDS)
}

fn contains_any(lower_text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| lower_text.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    mod symptom_detection {
        use super::*;

        #[test]
        fn detects_anxiety_from_keyword() {
            let signals = analyze_utterance("I've been so anxious about everything");
            assert_eq!(signals.detected_symptoms, vec!["anxiety"]);
        }

        #[test]
        fn detects_multiple_symptom_groups() {
            let signals = analyze_utterance("Work has me stressed and I can't sleep");
            assert!(signals.detected_symptoms.contains(&"sleep".to_string()));
            assert!(signals.detected_symptoms.contains(&"work_stress".to_string()));
        }

        #[test]
        fn matching_is_case_insensitive() {
            let signals = analyze_utterance("I feel DEPRESSED and WORTHLESS");
            assert_eq!(signals.detected_symptoms, vec!["depression"]);
        }

        #[test]
        fn tired_matches_both_depression_and_sleep() {
            // "tired" appears in two keyword tables; both groups fire
            let signals = analyze_utterance("I'm always tired");
            assert!(signals.detected_symptoms.contains(&"depression".to_string()));
            assert!(signals.detected_symptoms.contains(&"sleep".to_string()));
        }

        #[test]
        fn each_group_appears_at_most_once() {
            let signals = analyze_utterance("anxious, worried, panic, nervous");
            assert_eq!(signals.detected_symptoms, vec!["anxiety"]);
        }

        #[test]
        fn substring_matching_fires_on_embedded_keywords() {
            // Pure substring semantics: "worked" contains "work"
            let signals = analyze_utterance("I worked through it");
            assert!(signals.detected_symptoms.contains(&"work_stress".to_string()));
        }

        #[test]
        fn neutral_text_yields_no_signals() {
            let signals = analyze_utterance("The weather is nice today");
            assert!(signals.is_empty());
        }
    }

    mod mood_and_patterns {
        use super::*;

        #[test]
        fn detects_low_mood() {
            let signals = analyze_utterance("I've been feeling really down lately");
            assert!(signals.mood_indicators.contains(&"low_mood".to_string()));
        }

        #[test]
        fn detects_irritability() {
            let signals = analyze_utterance("I'm so frustrated with everyone");
            assert!(signals.mood_indicators.contains(&"irritability".to_string()));
        }

        #[test]
        fn detects_avoidance_behavior() {
            let signals = analyze_utterance("I cancelled plans and avoid going out");
            assert!(signals.behavioral_patterns.contains(&"avoidance".to_string()));
        }

        #[test]
        fn detects_all_or_nothing_thinking() {
            let signals = analyze_utterance("I always mess things up, nothing works");
            assert!(signals
                .cognitive_patterns
                .contains(&"all_or_nothing_thinking".to_string()));
        }

        #[test]
        fn detects_catastrophizing() {
            let signals = analyze_utterance("What if I lose my job next week?");
            assert!(signals.cognitive_patterns.contains(&"catastrophizing".to_string()));
        }
    }

    mod crisis_detection {
        use super::*;

        #[test]
        fn detects_crisis_phrases() {
            assert!(detect_crisis("Sometimes I think about ending my life"));
            assert!(detect_crisis("I want to hurt myself"));
            assert!(detect_crisis("everyone would be BETTER OFF DEAD without me"));
        }

        #[test]
        fn no_crisis_in_neutral_text() {
            assert!(!detect_crisis("I had a rough day at work"));
        }

        #[test]
        fn crisis_and_signals_are_independent() {
            let text = "I feel hopeless and think about death";
            let signals = analyze_utterance(text);
            assert!(signals.detected_symptoms.contains(&"depression".to_string()));
            assert!(detect_crisis(text));
        }
    }
}
