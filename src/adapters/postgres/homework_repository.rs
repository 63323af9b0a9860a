//! PostgreSQL implementation of the homework assignment repository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    DomainError, ErrorCode, HomeworkId, PatientId, SessionId, Timestamp,
};
use crate::domain::treatment::HomeworkAssignment;
use crate::ports::HomeworkRepository;

use super::{db_error, row_error};

#[derive(Clone)]
pub struct PostgresHomeworkRepository {
    pool: PgPool,
}

impl PostgresHomeworkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HomeworkRepository for PostgresHomeworkRepository {
    async fn create(
        &self,
        patient_id: PatientId,
        session_id: SessionId,
        assignment_type: &str,
        description: &str,
    ) -> Result<HomeworkAssignment, DomainError> {
        let mut assignment = HomeworkAssignment::new(
            HomeworkId::new(0),
            patient_id,
            session_id,
            assignment_type,
            description,
        );

        let row = sqlx::query(
            r#"
            INSERT INTO homework_assignments
                (patient_id, session_id, assignment_type, description,
                 instructions, due_date, completed, assigned_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(assignment.patient_id.as_i64())
        .bind(assignment.session_id.as_i64())
        .bind(&assignment.assignment_type)
        .bind(&assignment.description)
        .bind(&assignment.instructions)
        .bind(*assignment.due_date.as_datetime())
        .bind(assignment.completed)
        .bind(*assignment.assigned_date.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create homework", e))?;

        let id: i64 = row.try_get("id").map_err(row_error)?;
        assignment.id = HomeworkId::new(id);
        Ok(assignment)
    }

    async fn update(&self, assignment: &HomeworkAssignment) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE homework_assignments
            SET completed = $2
            WHERE id = $1
            "#,
        )
        .bind(assignment.id.as_i64())
        .bind(assignment.completed)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update homework", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::HomeworkNotFound,
                "Homework not found",
            ));
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: HomeworkId,
    ) -> Result<Option<HomeworkAssignment>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, patient_id, session_id, assignment_type, description,
                   instructions, due_date, completed, assigned_date
            FROM homework_assignments
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch homework", e))?;

        row.map(row_to_homework).transpose()
    }

    async fn find_pending_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<HomeworkAssignment>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, patient_id, session_id, assignment_type, description,
                   instructions, due_date, completed, assigned_date
            FROM homework_assignments
            WHERE patient_id = $1 AND completed = false
            ORDER BY assigned_date DESC, id DESC
            "#,
        )
        .bind(patient_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list pending homework", e))?;

        rows.into_iter().map(row_to_homework).collect()
    }

    async fn find_recent_by_patient(
        &self,
        patient_id: PatientId,
        limit: u32,
    ) -> Result<Vec<HomeworkAssignment>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, patient_id, session_id, assignment_type, description,
                   instructions, due_date, completed, assigned_date
            FROM homework_assignments
            WHERE patient_id = $1
            ORDER BY assigned_date DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(patient_id.as_i64())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list recent homework", e))?;

        rows.into_iter().map(row_to_homework).collect()
    }

    async fn find_by_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<HomeworkAssignment>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, patient_id, session_id, assignment_type, description,
                   instructions, due_date, completed, assigned_date
            FROM homework_assignments
            WHERE session_id = $1
            ORDER BY assigned_date ASC, id ASC
            "#,
        )
        .bind(session_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list session homework", e))?;

        rows.into_iter().map(row_to_homework).collect()
    }
}

fn row_to_homework(row: PgRow) -> Result<HomeworkAssignment, DomainError> {
    let id: i64 = row.try_get("id").map_err(row_error)?;
    let patient_id: i64 = row.try_get("patient_id").map_err(row_error)?;
    let session_id: i64 = row.try_get("session_id").map_err(row_error)?;
    let due_date: chrono::DateTime<chrono::Utc> = row.try_get("due_date").map_err(row_error)?;
    let assigned_date: chrono::DateTime<chrono::Utc> =
        row.try_get("assigned_date").map_err(row_error)?;

    Ok(HomeworkAssignment {
        id: HomeworkId::new(id),
        patient_id: PatientId::new(patient_id),
        session_id: SessionId::new(session_id),
        assignment_type: row.try_get("assignment_type").map_err(row_error)?,
        description: row.try_get("description").map_err(row_error)?,
        instructions: row.try_get("instructions").map_err(row_error)?,
        due_date: Timestamp::from_datetime(due_date),
        completed: row.try_get("completed").map_err(row_error)?,
        assigned_date: Timestamp::from_datetime(assigned_date),
    })
}
