//! Standardized assessment instruments.
//!
//! Item text and severity bands follow the published PHQ-9 and GAD-7
//! scales. Items are answered on a 0-3 frequency scale.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum value on the per-item response scale.
pub const MAX_ITEM_SCORE: u8 = 3;

const PHQ9_ITEMS: &[&str] = &[
    "Little interest or pleasure in doing things",
    "Feeling down, depressed, or hopeless",
    "Trouble falling or staying asleep, or sleeping too much",
    "Feeling tired or having little energy",
    "Poor appetite or overeating",
    "Feeling bad about yourself or that you are a failure",
    "Trouble concentrating on things",
    "Moving or speaking slowly or being fidgety",
    "Thoughts that you would be better off dead or of hurting yourself",
];

const GAD7_ITEMS: &[&str] = &[
    "Feeling nervous, anxious, or on edge",
    "Not being able to stop or control worrying",
    "Worrying too much about different things",
    "Trouble relaxing",
    "Being so restless that it is hard to sit still",
    "Becoming easily annoyed or irritable",
    "Feeling afraid, as if something awful might happen",
];

const PHQ9_BANDS: &[(u32, u32, &str)] = &[
    (0, 4, "Minimal depression"),
    (5, 9, "Mild depression"),
    (10, 14, "Moderate depression"),
    (15, 19, "Moderately severe depression"),
    (20, 27, "Severe depression"),
];

const GAD7_BANDS: &[(u32, u32, &str)] = &[
    (0, 4, "Minimal anxiety"),
    (5, 9, "Mild anxiety"),
    (10, 14, "Moderate anxiety"),
    (15, 21, "Severe anxiety"),
];

/// A supported assessment instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instrument {
    #[serde(rename = "PHQ9")]
    Phq9,
    #[serde(rename = "GAD7")]
    Gad7,
}

impl Instrument {
    /// Short key used in report maps and storage ("PHQ9", "GAD7").
    pub fn key(&self) -> &'static str {
        match self {
            Self::Phq9 => "PHQ9",
            Self::Gad7 => "GAD7",
        }
    }

    /// Full published name of the instrument.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Phq9 => "Patient Health Questionnaire-9 (PHQ-9)",
            Self::Gad7 => "Generalized Anxiety Disorder-7 (GAD-7)",
        }
    }

    /// The instrument's item texts, in order.
    pub fn items(&self) -> &'static [&'static str] {
        match self {
            Self::Phq9 => PHQ9_ITEMS,
            Self::Gad7 => GAD7_ITEMS,
        }
    }

    /// Number of items on the instrument.
    pub fn item_count(&self) -> usize {
        self.items().len()
    }

    /// Severity label for a total score, first matching band wins.
    ///
    /// Scores outside every band report "Unknown".
    pub fn severity_for(&self, total_score: u32) -> &'static str {
        let bands = match self {
            Self::Phq9 => PHQ9_BANDS,
            Self::Gad7 => GAD7_BANDS,
        };
        for (lo, hi, label) in bands {
            if (*lo..=*hi).contains(&total_score) {
                return label;
            }
        }
        "Unknown"
    }

    /// Selects the instruments to run for a set of detected symptom tags.
    ///
    /// Anxiety triggers the GAD-7 and depression the PHQ-9; both can run
    /// in one pass. When neither is present the PHQ-9 runs as the default
    /// screen.
    pub fn select_for_symptoms(symptoms: &[String]) -> Vec<Instrument> {
        let mut selected = Vec::new();
        if symptoms.iter().any(|s| s == "anxiety") {
            selected.push(Instrument::Gad7);
        }
        if symptoms.iter().any(|s| s == "depression") {
            selected.push(Instrument::Phq9);
        }
        if selected.is_empty() {
            selected.push(Instrument::Phq9);
        }
        selected
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Instrument {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PHQ9" => Ok(Self::Phq9),
            "GAD7" => Ok(Self::Gad7),
            _ => Err(format!("unknown instrument: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod item_sets {
        use super::*;

        #[test]
        fn phq9_has_nine_items() {
            assert_eq!(Instrument::Phq9.item_count(), 9);
        }

        #[test]
        fn gad7_has_seven_items() {
            assert_eq!(Instrument::Gad7.item_count(), 7);
        }
    }

    mod severity_bands {
        use super::*;

        #[test]
        fn phq9_band_boundaries() {
            assert_eq!(Instrument::Phq9.severity_for(0), "Minimal depression");
            assert_eq!(Instrument::Phq9.severity_for(4), "Minimal depression");
            assert_eq!(Instrument::Phq9.severity_for(5), "Mild depression");
            assert_eq!(Instrument::Phq9.severity_for(10), "Moderate depression");
            assert_eq!(Instrument::Phq9.severity_for(15), "Moderately severe depression");
            assert_eq!(Instrument::Phq9.severity_for(20), "Severe depression");
            assert_eq!(Instrument::Phq9.severity_for(27), "Severe depression");
        }

        #[test]
        fn gad7_band_boundaries() {
            assert_eq!(Instrument::Gad7.severity_for(0), "Minimal anxiety");
            assert_eq!(Instrument::Gad7.severity_for(5), "Mild anxiety");
            assert_eq!(Instrument::Gad7.severity_for(14), "Moderate anxiety");
            assert_eq!(Instrument::Gad7.severity_for(15), "Severe anxiety");
            assert_eq!(Instrument::Gad7.severity_for(21), "Severe anxiety");
        }

        #[test]
        fn out_of_range_score_is_unknown() {
            assert_eq!(Instrument::Phq9.severity_for(28), "Unknown");
            assert_eq!(Instrument::Gad7.severity_for(22), "Unknown");
        }
    }

    mod selection {
        use super::*;

        fn tags(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        #[test]
        fn anxiety_selects_gad7() {
            assert_eq!(
                Instrument::select_for_symptoms(&tags(&["anxiety"])),
                vec![Instrument::Gad7]
            );
        }

        #[test]
        fn depression_selects_phq9() {
            assert_eq!(
                Instrument::select_for_symptoms(&tags(&["depression"])),
                vec![Instrument::Phq9]
            );
        }

        #[test]
        fn both_symptoms_select_both_instruments() {
            assert_eq!(
                Instrument::select_for_symptoms(&tags(&["depression", "anxiety", "sleep"])),
                vec![Instrument::Gad7, Instrument::Phq9]
            );
        }

        #[test]
        fn no_relevant_symptoms_defaults_to_phq9() {
            assert_eq!(
                Instrument::select_for_symptoms(&tags(&["work_stress"])),
                vec![Instrument::Phq9]
            );
            assert_eq!(Instrument::select_for_symptoms(&[]), vec![Instrument::Phq9]);
        }
    }
}
