//! HTTP DTOs for treatment goal and homework endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::treatment::{HomeworkAssignment, TreatmentGoal};

/// Treatment goal view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct GoalResponse {
    pub id: i64,
    pub patient_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<i64>,
    pub goal_type: String,
    pub description: String,
    pub target_date: String,
    pub status: String,
    pub current_progress: u8,
    pub created_date: String,
}

impl From<TreatmentGoal> for GoalResponse {
    fn from(goal: TreatmentGoal) -> Self {
        Self {
            id: goal.id.as_i64(),
            patient_id: goal.patient_id.as_i64(),
            session_id: goal.session_id.map(|id| id.as_i64()),
            goal_type: goal.goal_type.as_str().to_string(),
            description: goal.description,
            target_date: goal.target_date.to_rfc3339(),
            status: goal.status,
            current_progress: goal.progress.value(),
            created_date: goal.created_date.to_rfc3339(),
        }
    }
}

/// Homework assignment view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct HomeworkResponse {
    pub id: i64,
    pub patient_id: i64,
    pub session_id: i64,
    pub assignment_type: String,
    pub description: String,
    pub instructions: String,
    pub due_date: String,
    pub completed: bool,
    pub assigned_date: String,
}

impl From<HomeworkAssignment> for HomeworkResponse {
    fn from(hw: HomeworkAssignment) -> Self {
        Self {
            id: hw.id.as_i64(),
            patient_id: hw.patient_id.as_i64(),
            session_id: hw.session_id.as_i64(),
            assignment_type: hw.assignment_type,
            description: hw.description,
            instructions: hw.instructions,
            due_date: hw.due_date.to_rfc3339(),
            completed: hw.completed,
            assigned_date: hw.assigned_date.to_rfc3339(),
        }
    }
}

/// Response after completing a homework assignment.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteHomeworkResponse {
    pub message: String,
    pub homework_id: i64,
}

/// Query parameter for goal progress updates.
#[derive(Debug, Clone, Deserialize)]
pub struct GoalProgressQuery {
    pub progress: i32,
}

/// Response after a goal progress update.
#[derive(Debug, Clone, Serialize)]
pub struct GoalProgressResponse {
    pub message: String,
    pub goal_id: i64,
    pub progress: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{GoalId, HomeworkId, PatientId, SessionId};
    use crate::domain::treatment::GoalCategory;

    #[test]
    fn goal_response_conversion() {
        let goal = TreatmentGoal::new(
            GoalId::new(3),
            PatientId::new(1),
            Some(SessionId::new(2)),
            GoalCategory::Behavioral,
            "Practice relaxation daily",
        );

        let response: GoalResponse = goal.into();
        assert_eq!(response.id, 3);
        assert_eq!(response.goal_type, "behavioral");
        assert_eq!(response.status, "active");
        assert_eq!(response.current_progress, 0);
    }

    #[test]
    fn homework_response_conversion() {
        let hw = HomeworkAssignment::new(
            HomeworkId::new(5),
            PatientId::new(1),
            SessionId::new(2),
            "thought_record",
            "Log anxious thoughts",
        );

        let response: HomeworkResponse = hw.into();
        assert_eq!(response.id, 5);
        assert_eq!(response.assignment_type, "thought_record");
        assert!(!response.completed);
    }
}
