//! Treatment goals and progress tracking.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{GoalId, PatientId, SessionId, Timestamp, ValidationError};

/// Days from creation to a goal's target date.
pub const GOAL_TARGET_DAYS: i64 = 90;

/// Category of a treatment goal.
///
/// Unrecognized categories from generated text collapse to `Symptom`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    #[default]
    Symptom,
    Behavioral,
    Functional,
}

impl GoalCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Symptom => "symptom",
            Self::Behavioral => "behavioral",
            Self::Functional => "functional",
        }
    }

    /// Maps a lowercased tag to a category, defaulting to `Symptom` for
    /// anything outside the known set.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "behavioral" => Self::Behavioral,
            "functional" => Self::Functional,
            _ => Self::Symptom,
        }
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GoalCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "symptom" => Ok(Self::Symptom),
            "behavioral" => Ok(Self::Behavioral),
            "functional" => Ok(Self::Functional),
            _ => Err(format!("unknown goal category: {}", s)),
        }
    }
}

/// Goal completion percentage, 0-100 inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress(u8);

impl Progress {
    /// Creates a progress value, rejecting anything above 100.
    pub fn new(value: i32) -> Result<Self, ValidationError> {
        if !(0..=100).contains(&value) {
            return Err(ValidationError::out_of_range("progress", 0, 100, value));
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// A treatment goal belonging to a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentGoal {
    pub id: GoalId,
    pub patient_id: PatientId,
    pub session_id: Option<SessionId>,
    pub goal_type: GoalCategory,
    pub description: String,
    pub target_date: Timestamp,
    pub status: String,
    pub progress: Progress,
    pub created_date: Timestamp,
}

impl TreatmentGoal {
    /// Creates an active goal with a target date 90 days out.
    pub fn new(
        id: GoalId,
        patient_id: PatientId,
        session_id: Option<SessionId>,
        goal_type: GoalCategory,
        description: impl Into<String>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            patient_id,
            session_id,
            goal_type,
            description: description.into(),
            target_date: now.add_days(GOAL_TARGET_DAYS),
            status: "active".to_string(),
            progress: Progress::default(),
            created_date: now,
        }
    }

    /// Returns true while the goal is being worked on.
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }

    pub fn update_progress(&mut self, progress: Progress) {
        self.progress = progress;
    }
}
