//! HTTP handlers for treatment goal and homework endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{domain_error_response, ErrorResponse};
use crate::domain::foundation::{ErrorCode, GoalId, HomeworkId};
use crate::domain::treatment::Progress;
use crate::ports::{GoalRepository, HomeworkRepository};

use super::dto::{CompleteHomeworkResponse, GoalProgressQuery, GoalProgressResponse};

#[derive(Clone)]
pub struct TreatmentHandlers {
    goals: Arc<dyn GoalRepository>,
    homework: Arc<dyn HomeworkRepository>,
}

impl TreatmentHandlers {
    pub fn new(goals: Arc<dyn GoalRepository>, homework: Arc<dyn HomeworkRepository>) -> Self {
        Self { goals, homework }
    }
}

/// POST /homework/:id/complete - Mark a homework assignment as done
pub async fn complete_homework(
    State(handlers): State<TreatmentHandlers>,
    Path(homework_id): Path<i64>,
) -> Response {
    let homework_id = HomeworkId::new(homework_id);

    let assignment = match handlers.homework.find_by_id(homework_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found(
                    ErrorCode::HomeworkNotFound,
                    "Homework not found",
                )),
            )
                .into_response()
        }
        Err(e) => return domain_error_response(e),
    };

    let mut assignment = assignment;
    assignment.mark_completed();

    match handlers.homework.update(&assignment).await {
        Ok(()) => (
            StatusCode::OK,
            Json(CompleteHomeworkResponse {
                message: "Homework marked as completed".to_string(),
                homework_id: homework_id.as_i64(),
            }),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// GET /goals/:id/progress?progress=N - Update goal progress
pub async fn update_goal_progress(
    State(handlers): State<TreatmentHandlers>,
    Path(goal_id): Path<i64>,
    Query(query): Query<GoalProgressQuery>,
) -> Response {
    let progress = match Progress::new(query.progress) {
        Ok(progress) => progress,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(
                    "Progress must be between 0 and 100",
                )),
            )
                .into_response()
        }
    };

    let goal_id = GoalId::new(goal_id);
    let mut goal = match handlers.goals.find_by_id(goal_id).await {
        Ok(Some(goal)) => goal,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found(
                    ErrorCode::GoalNotFound,
                    "Goal not found",
                )),
            )
                .into_response()
        }
        Err(e) => return domain_error_response(e),
    };

    goal.update_progress(progress);

    match handlers.goals.update(&goal).await {
        Ok(()) => (
            StatusCode::OK,
            Json(GoalProgressResponse {
                message: "Goal progress updated".to_string(),
                goal_id: goal_id.as_i64(),
                progress: progress.value(),
            }),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryGoalRepository, InMemoryHomeworkRepository};
    use crate::domain::foundation::{PatientId, SessionId};
    use crate::domain::treatment::GoalCategory;

    fn handlers() -> (
        TreatmentHandlers,
        Arc<InMemoryGoalRepository>,
        Arc<InMemoryHomeworkRepository>,
    ) {
        let goals = Arc::new(InMemoryGoalRepository::new());
        let homework = Arc::new(InMemoryHomeworkRepository::new());
        (
            TreatmentHandlers::new(goals.clone(), homework.clone()),
            goals,
            homework,
        )
    }

    #[tokio::test]
    async fn complete_homework_marks_assignment_done() {
        let (state, _, homework) = handlers();
        let assignment = homework
            .create(PatientId::new(1), SessionId::new(1), "journaling", "Journal nightly")
            .await
            .unwrap();

        let response = complete_homework(State(state), Path(assignment.id.as_i64())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let stored = homework.find_by_id(assignment.id).await.unwrap().unwrap();
        assert!(stored.completed);
    }

    #[tokio::test]
    async fn complete_homework_unknown_id_is_404() {
        let (state, _, _) = handlers();
        let response = complete_homework(State(state), Path(42)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn goal_progress_updates_stored_value() {
        let (state, goals, _) = handlers();
        let goal = goals
            .create(PatientId::new(1), None, GoalCategory::Symptom, "Reduce worry")
            .await
            .unwrap();

        let response = update_goal_progress(
            State(state),
            Path(goal.id.as_i64()),
            Query(GoalProgressQuery { progress: 60 }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let stored = goals.find_by_id(goal.id).await.unwrap().unwrap();
        assert_eq!(stored.progress.value(), 60);
    }

    #[tokio::test]
    async fn goal_progress_out_of_range_is_400() {
        let (state, goals, _) = handlers();
        let goal = goals
            .create(PatientId::new(1), None, GoalCategory::Symptom, "Reduce worry")
            .await
            .unwrap();

        let response = update_goal_progress(
            State(state),
            Path(goal.id.as_i64()),
            Query(GoalProgressQuery { progress: 101 }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
