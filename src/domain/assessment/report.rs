//! Assessment scoring results and the per-session report.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Instrument;

/// Scored result for a single instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Per-item responses keyed "q1".."qN".
    pub responses: BTreeMap<String, u8>,

    /// Sum of the recorded item responses.
    pub total_score: u32,

    /// Severity label from the instrument's bands.
    pub severity: String,

    /// Human-readable interpretation line.
    pub interpretation: String,
}

impl ScoreResult {
    /// Scores an instrument from a free-text model reply.
    ///
    /// Every ASCII digit in the reply is taken as one item response, in
    /// order, up to the instrument's item count. Extra digits are ignored;
    /// a short reply simply scores the items it covers.
    pub fn from_reply(instrument: Instrument, reply: &str) -> Self {
        let digits: Vec<u8> = reply
            .chars()
            .filter_map(|c| c.to_digit(10).map(|d| d as u8))
            .take(instrument.item_count())
            .collect();

        let responses: BTreeMap<String, u8> = digits
            .iter()
            .enumerate()
            .map(|(i, d)| (format!("q{}", i + 1), *d))
            .collect();

        let total_score: u32 = digits.iter().map(|d| u32::from(*d)).sum();
        let severity = instrument.severity_for(total_score).to_string();
        let interpretation = format!("Score of {} indicates {}", total_score, severity);

        Self {
            responses,
            total_score,
            severity,
            interpretation,
        }
    }

    /// Deterministic result when the model reply is unavailable: every
    /// item scores 1, reported as mild.
    pub fn fallback(instrument: Instrument) -> Self {
        let count = instrument.item_count();
        let responses: BTreeMap<String, u8> =
            (0..count).map(|i| (format!("q{}", i + 1), 1)).collect();

        Self {
            responses,
            total_score: count as u32,
            severity: "Mild".to_string(),
            interpretation: "Estimated mild symptoms based on conversation".to_string(),
        }
    }
}

/// Scored instrument results for one session, keyed by instrument.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentReport {
    results: BTreeMap<String, ScoreResult>,
}

impl AssessmentReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a scored result for an instrument.
    pub fn insert(&mut self, instrument: Instrument, result: ScoreResult) {
        self.results.insert(instrument.key().to_string(), result);
    }

    pub fn get(&self, instrument: Instrument) -> Option<&ScoreResult> {
        self.results.get(instrument.key())
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterates over instrument keys and their results.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScoreResult)> {
        self.results.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod scoring {
        use super::*;

        #[test]
        fn scores_space_separated_digits() {
            let result = ScoreResult::from_reply(Instrument::Gad7, "2 1 3 1 0 2 1");
            assert_eq!(result.total_score, 10);
            assert_eq!(result.severity, "Moderate anxiety");
            assert_eq!(result.interpretation, "Score of 10 indicates Moderate anxiety");
            assert_eq!(result.responses["q1"], 2);
            assert_eq!(result.responses["q7"], 1);
        }

        #[test]
        fn digits_embedded_in_prose_still_count() {
            let result = ScoreResult::from_reply(Instrument::Gad7, "Sure: 1, 2, then 0 0 0 1 2.");
            assert_eq!(result.total_score, 6);
            assert_eq!(result.responses.len(), 7);
        }

        #[test]
        fn extra_digits_beyond_item_count_are_ignored() {
            let result = ScoreResult::from_reply(Instrument::Gad7, "3 3 3 3 3 3 3 3 3 3");
            assert_eq!(result.responses.len(), 7);
            assert_eq!(result.total_score, 21);
            assert_eq!(result.severity, "Severe anxiety");
        }

        #[test]
        fn short_reply_scores_only_covered_items() {
            let result = ScoreResult::from_reply(Instrument::Phq9, "2 2");
            assert_eq!(result.responses.len(), 2);
            assert_eq!(result.total_score, 4);
            assert_eq!(result.severity, "Minimal depression");
        }

        #[test]
        fn reply_with_no_digits_scores_zero() {
            let result = ScoreResult::from_reply(Instrument::Phq9, "no numbers here");
            assert!(result.responses.is_empty());
            assert_eq!(result.total_score, 0);
            assert_eq!(result.severity, "Minimal depression");
        }
    }

    mod fallback {
        use super::*;

        #[test]
        fn fallback_scores_every_item_one() {
            let result = ScoreResult::fallback(Instrument::Phq9);
            assert_eq!(result.responses.len(), 9);
            assert!(result.responses.values().all(|v| *v == 1));
            assert_eq!(result.total_score, 9);
            assert_eq!(result.severity, "Mild");
            assert_eq!(
                result.interpretation,
                "Estimated mild symptoms based on conversation"
            );
        }

        #[test]
        fn fallback_total_matches_item_count() {
            assert_eq!(ScoreResult::fallback(Instrument::Gad7).total_score, 7);
        }
    }

    mod report {
        use super::*;

        #[test]
        fn report_keys_by_instrument() {
            let mut report = AssessmentReport::new();
            report.insert(Instrument::Gad7, ScoreResult::fallback(Instrument::Gad7));

            assert!(report.get(Instrument::Gad7).is_some());
            assert!(report.get(Instrument::Phq9).is_none());
        }

        #[test]
        fn report_serializes_as_flat_map() {
            let mut report = AssessmentReport::new();
            report.insert(Instrument::Phq9, ScoreResult::fallback(Instrument::Phq9));

            let json = serde_json::to_value(&report).unwrap();
            assert_eq!(json["PHQ9"]["total_score"], 9);
            assert_eq!(json["PHQ9"]["severity"], "Mild");
        }
    }
}
