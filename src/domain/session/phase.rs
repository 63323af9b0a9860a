//! Session phases within a therapy conversation.
//!
//! Phases drive what kind of dialogue the therapist agent engages in and
//! advance on a fixed exchange-count schedule. Transitions are strictly
//! forward: a session never returns to an earlier phase.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The current phase of a therapy session.
///
/// Phases follow a fixed order:
/// `Intake` → `Assessment` → `Therapy` → `GoalSetting` →
/// `HomeworkAssignment` → `Closing` → `Completed`
///
/// Each phase (except `Completed`) carries an exchange-count threshold;
/// once the session's total exchange count reaches it, the session moves
/// one phase forward. `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Initial exploration of concerns, stressors, and rapport building.
    Intake,

    /// Structured symptom assessment (PHQ-9/GAD-7 style questioning).
    Assessment,

    /// Active therapeutic work using CBT techniques.
    Therapy,

    /// Collaborative SMART goal setting.
    GoalSetting,

    /// Assignment of between-session homework.
    HomeworkAssignment,

    /// Session wrap-up and summary.
    Closing,

    /// Terminal state; the session accepts no further exchanges.
    Completed,
}

impl SessionPhase {
    /// All phases in transition order.
    pub const ALL: [SessionPhase; 7] = [
        SessionPhase::Intake,
        SessionPhase::Assessment,
        SessionPhase::Therapy,
        SessionPhase::GoalSetting,
        SessionPhase::HomeworkAssignment,
        SessionPhase::Closing,
        SessionPhase::Completed,
    ];

    /// Position of this phase in the fixed order.
    pub fn order_index(&self) -> usize {
        match self {
            Self::Intake => 0,
            Self::Assessment => 1,
            Self::Therapy => 2,
            Self::GoalSetting => 3,
            Self::HomeworkAssignment => 4,
            Self::Closing => 5,
            Self::Completed => 6,
        }
    }

    /// The exchange count at which the session leaves this phase.
    ///
    /// Returns `None` for `Completed`, which has no exit.
    pub fn advance_threshold(&self) -> Option<u32> {
        match self {
            Self::Intake => Some(6),
            Self::Assessment => Some(12),
            Self::Therapy => Some(18),
            Self::GoalSetting => Some(22),
            Self::HomeworkAssignment => Some(25),
            Self::Closing => Some(27),
            Self::Completed => None,
        }
    }

    /// The phase that follows this one, if any.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Intake => Some(Self::Assessment),
            Self::Assessment => Some(Self::Therapy),
            Self::Therapy => Some(Self::GoalSetting),
            Self::GoalSetting => Some(Self::HomeworkAssignment),
            Self::HomeworkAssignment => Some(Self::Closing),
            Self::Closing => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    /// Evaluates the transition policy for a session in this phase.
    ///
    /// `exchange_count` is the total number of exchanges including the one
    /// just recorded. Returns the next phase if the threshold is met, or
    /// `None` if the session stays put. At most one step is taken per
    /// evaluation regardless of how far the count exceeds later thresholds.
    pub fn evaluate_transition(&self, exchange_count: u32) -> Option<Self> {
        let threshold = self.advance_threshold()?;
        if exchange_count >= threshold {
            self.next()
        } else {
            None
        }
    }

    /// Returns true if the session is in its terminal phase.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Wire/storage representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intake => "intake",
            Self::Assessment => "assessment",
            Self::Therapy => "therapy",
            Self::GoalSetting => "goal_setting",
            Self::HomeworkAssignment => "homework_assignment",
            Self::Closing => "closing",
            Self::Completed => "completed",
        }
    }
}

impl Default for SessionPhase {
    fn default() -> Self {
        Self::Intake
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SessionPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "intake" => Ok(Self::Intake),
            "assessment" => Ok(Self::Assessment),
            "therapy" => Ok(Self::Therapy),
            "goal_setting" => Ok(Self::GoalSetting),
            "homework_assignment" => Ok(Self::HomeworkAssignment),
            "closing" => Ok(Self::Closing),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("unknown session phase: {}", s)),
        }
    }
}
