//! PostgreSQL implementation of the patient repository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, PatientId, Timestamp};
use crate::domain::patient::Patient;
use crate::ports::PatientRepository;

use super::{db_error, row_error};

#[derive(Clone)]
pub struct PostgresPatientRepository {
    pool: PgPool,
}

impl PostgresPatientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PatientRepository for PostgresPatientRepository {
    async fn create(&self, name: &str) -> Result<Patient, DomainError> {
        // Run domain validation before touching the database.
        let mut patient = Patient::new(PatientId::new(0), name).map_err(DomainError::from)?;

        let row = sqlx::query(
            r#"
            INSERT INTO patients
                (name, created_date, preferred_therapy_mode, detected_symptoms, session_notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&patient.name)
        .bind(*patient.created_date.as_datetime())
        .bind(&patient.preferred_therapy_mode)
        .bind(Json(&patient.detected_symptoms))
        .bind(Json(&patient.session_notes))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create patient", e))?;

        let id: i64 = row.try_get("id").map_err(row_error)?;
        patient.id = PatientId::new(id);
        Ok(patient)
    }

    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, created_date, preferred_therapy_mode,
                   detected_symptoms, session_notes
            FROM patients
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch patient", e))?;

        row.map(row_to_patient).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Patient>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, created_date, preferred_therapy_mode,
                   detected_symptoms, session_notes
            FROM patients
            ORDER BY created_date DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list patients", e))?;

        rows.into_iter().map(row_to_patient).collect()
    }
}

fn row_to_patient(row: PgRow) -> Result<Patient, DomainError> {
    let id: i64 = row.try_get("id").map_err(row_error)?;
    let created_date: chrono::DateTime<chrono::Utc> =
        row.try_get("created_date").map_err(row_error)?;
    let Json(detected_symptoms): Json<Vec<String>> =
        row.try_get("detected_symptoms").map_err(row_error)?;
    let Json(session_notes): Json<Vec<String>> =
        row.try_get("session_notes").map_err(row_error)?;

    Ok(Patient {
        id: PatientId::new(id),
        name: row.try_get("name").map_err(row_error)?,
        created_date: Timestamp::from_datetime(created_date),
        preferred_therapy_mode: row.try_get("preferred_therapy_mode").map_err(row_error)?,
        detected_symptoms,
        session_notes,
    })
}
