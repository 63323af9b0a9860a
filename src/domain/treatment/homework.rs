//! Homework assignments given between sessions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{HomeworkId, PatientId, SessionId, Timestamp};

/// Days from assignment to a homework due date.
pub const HOMEWORK_DUE_DAYS: i64 = 7;

/// Assignment type used when generated text carries no bracketed tag.
pub const DEFAULT_ASSIGNMENT_TYPE: &str = "thought_record";

/// Standard instructions attached to every generated assignment.
pub const STANDARD_INSTRUCTIONS: &str =
    "Complete this assignment over the next week and bring your observations to the next session.";

/// A between-session homework assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeworkAssignment {
    pub id: HomeworkId,
    pub patient_id: PatientId,
    pub session_id: SessionId,
    pub assignment_type: String,
    pub description: String,
    pub instructions: String,
    pub due_date: Timestamp,
    pub completed: bool,
    pub assigned_date: Timestamp,
}

impl HomeworkAssignment {
    /// Creates a pending assignment due one week out.
    pub fn new(
        id: HomeworkId,
        patient_id: PatientId,
        session_id: SessionId,
        assignment_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            patient_id,
            session_id,
            assignment_type: assignment_type.into(),
            description: description.into(),
            instructions: STANDARD_INSTRUCTIONS.to_string(),
            due_date: now.add_days(HOMEWORK_DUE_DAYS),
            completed: false,
            assigned_date: now,
        }
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
    }
}
