//! PostgreSQL implementation of the treatment goal repository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, GoalId, PatientId, SessionId, Timestamp};
use crate::domain::treatment::{GoalCategory, Progress, TreatmentGoal};
use crate::ports::GoalRepository;

use super::{db_error, row_error};

#[derive(Clone)]
pub struct PostgresGoalRepository {
    pool: PgPool,
}

impl PostgresGoalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GoalRepository for PostgresGoalRepository {
    async fn create(
        &self,
        patient_id: PatientId,
        session_id: Option<SessionId>,
        category: GoalCategory,
        description: &str,
    ) -> Result<TreatmentGoal, DomainError> {
        let mut goal = TreatmentGoal::new(GoalId::new(0), patient_id, session_id, category, description);

        let row = sqlx::query(
            r#"
            INSERT INTO treatment_goals
                (patient_id, session_id, goal_type, description, target_date,
                 status, current_progress, created_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(goal.patient_id.as_i64())
        .bind(goal.session_id.map(|id| id.as_i64()))
        .bind(goal.goal_type.as_str())
        .bind(&goal.description)
        .bind(*goal.target_date.as_datetime())
        .bind(&goal.status)
        .bind(goal.progress.value() as i32)
        .bind(*goal.created_date.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create goal", e))?;

        let id: i64 = row.try_get("id").map_err(row_error)?;
        goal.id = GoalId::new(id);
        Ok(goal)
    }

    async fn update(&self, goal: &TreatmentGoal) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE treatment_goals
            SET status = $2, current_progress = $3
            WHERE id = $1
            "#,
        )
        .bind(goal.id.as_i64())
        .bind(&goal.status)
        .bind(goal.progress.value() as i32)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update goal", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::GoalNotFound, "Goal not found"));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: GoalId) -> Result<Option<TreatmentGoal>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, patient_id, session_id, goal_type, description,
                   target_date, status, current_progress, created_date
            FROM treatment_goals
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch goal", e))?;

        row.map(row_to_goal).transpose()
    }

    async fn find_active_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<TreatmentGoal>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, patient_id, session_id, goal_type, description,
                   target_date, status, current_progress, created_date
            FROM treatment_goals
            WHERE patient_id = $1 AND status = 'active'
            ORDER BY created_date DESC, id DESC
            "#,
        )
        .bind(patient_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list active goals", e))?;

        rows.into_iter().map(row_to_goal).collect()
    }

    async fn find_by_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<TreatmentGoal>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, patient_id, session_id, goal_type, description,
                   target_date, status, current_progress, created_date
            FROM treatment_goals
            WHERE session_id = $1
            ORDER BY created_date ASC, id ASC
            "#,
        )
        .bind(session_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list session goals", e))?;

        rows.into_iter().map(row_to_goal).collect()
    }
}

fn row_to_goal(row: PgRow) -> Result<TreatmentGoal, DomainError> {
    let id: i64 = row.try_get("id").map_err(row_error)?;
    let patient_id: i64 = row.try_get("patient_id").map_err(row_error)?;
    let session_id: Option<i64> = row.try_get("session_id").map_err(row_error)?;
    let goal_type: String = row.try_get("goal_type").map_err(row_error)?;
    let target_date: chrono::DateTime<chrono::Utc> =
        row.try_get("target_date").map_err(row_error)?;
    let current_progress: i32 = row.try_get("current_progress").map_err(row_error)?;
    let created_date: chrono::DateTime<chrono::Utc> =
        row.try_get("created_date").map_err(row_error)?;

    Ok(TreatmentGoal {
        id: GoalId::new(id),
        patient_id: PatientId::new(patient_id),
        session_id: session_id.map(SessionId::new),
        goal_type: GoalCategory::from_tag(&goal_type),
        description: row.try_get("description").map_err(row_error)?,
        target_date: Timestamp::from_datetime(target_date),
        status: row.try_get("status").map_err(row_error)?,
        progress: Progress::new(current_progress).map_err(DomainError::from)?,
        created_date: Timestamp::from_datetime(created_date),
    })
}
