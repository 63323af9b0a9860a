//! PostgreSQL implementation of the diagnosis documentation repository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::diagnosis::{AutoDiagnosis, DiagnosisRecord, NewDiagnosis};
use crate::domain::foundation::{
    DiagnosisId, DomainError, ErrorCode, PatientId, SessionId, Timestamp,
};
use crate::ports::DiagnosisRepository;

use super::{db_error, row_error};

const DIAGNOSIS_COLUMNS: &str = r#"
    SELECT id, patient_id, session_id, diagnosis_code, diagnosis_name,
           severity, confidence_level, supporting_evidence,
           differential_diagnoses, ruling_out, clinical_notes,
           diagnostic_criteria, diagnosed_by, status,
           created_date, updated_date
    FROM diagnosis_documentation
"#;

#[derive(Clone)]
pub struct PostgresDiagnosisRepository {
    pool: PgPool,
}

impl PostgresDiagnosisRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, record: &DiagnosisRecord) -> Result<DiagnosisId, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO diagnosis_documentation
                (patient_id, session_id, diagnosis_code, diagnosis_name,
                 severity, confidence_level, supporting_evidence,
                 differential_diagnoses, ruling_out, clinical_notes,
                 diagnostic_criteria, diagnosed_by, status,
                 created_date, updated_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING id
            "#,
        )
        .bind(record.patient_id.as_i64())
        .bind(record.session_id.map(|id| id.as_i64()))
        .bind(&record.diagnosis_code)
        .bind(&record.diagnosis_name)
        .bind(&record.severity)
        .bind(&record.confidence_level)
        .bind(&record.supporting_evidence)
        .bind(Json(&record.differential_diagnoses))
        .bind(Json(&record.ruling_out))
        .bind(&record.clinical_notes)
        .bind(Json(&record.diagnostic_criteria))
        .bind(&record.diagnosed_by)
        .bind(&record.status)
        .bind(*record.created_date.as_datetime())
        .bind(*record.updated_date.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create diagnosis", e))?;

        let id: i64 = row.try_get("id").map_err(row_error)?;
        Ok(DiagnosisId::new(id))
    }
}

#[async_trait]
impl DiagnosisRepository for PostgresDiagnosisRepository {
    async fn create_manual(&self, new: &NewDiagnosis) -> Result<DiagnosisRecord, DomainError> {
        let mut record =
            DiagnosisRecord::manual(DiagnosisId::new(0), new).map_err(DomainError::from)?;
        record.id = self.insert(&record).await?;
        Ok(record)
    }

    async fn create_automated(
        &self,
        patient_id: PatientId,
        session_id: SessionId,
        assessment: &AutoDiagnosis,
    ) -> Result<DiagnosisRecord, DomainError> {
        let mut record =
            DiagnosisRecord::automated(DiagnosisId::new(0), patient_id, session_id, assessment);
        record.id = self.insert(&record).await?;
        Ok(record)
    }

    async fn update(&self, record: &DiagnosisRecord) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE diagnosis_documentation
            SET diagnosis_code = $2,
                diagnosis_name = $3,
                severity = $4,
                confidence_level = $5,
                supporting_evidence = $6,
                clinical_notes = $7,
                status = $8,
                updated_date = $9
            WHERE id = $1
            "#,
        )
        .bind(record.id.as_i64())
        .bind(&record.diagnosis_code)
        .bind(&record.diagnosis_name)
        .bind(&record.severity)
        .bind(&record.confidence_level)
        .bind(&record.supporting_evidence)
        .bind(&record.clinical_notes)
        .bind(&record.status)
        .bind(*record.updated_date.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update diagnosis", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::DiagnosisNotFound,
                "Diagnosis not found",
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: DiagnosisId) -> Result<Option<DiagnosisRecord>, DomainError> {
        let query = format!("{} WHERE id = $1", DIAGNOSIS_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch diagnosis", e))?;

        row.map(row_to_diagnosis).transpose()
    }

    async fn find_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<DiagnosisRecord>, DomainError> {
        let query = format!(
            "{} WHERE patient_id = $1 ORDER BY created_date DESC, id DESC",
            DIAGNOSIS_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(patient_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list patient diagnoses", e))?;

        rows.into_iter().map(row_to_diagnosis).collect()
    }

    async fn find_by_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<DiagnosisRecord>, DomainError> {
        let query = format!(
            "{} WHERE session_id = $1 ORDER BY created_date DESC, id DESC",
            DIAGNOSIS_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(session_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list session diagnoses", e))?;

        rows.into_iter().map(row_to_diagnosis).collect()
    }
}

fn row_to_diagnosis(row: PgRow) -> Result<DiagnosisRecord, DomainError> {
    let id: i64 = row.try_get("id").map_err(row_error)?;
    let patient_id: i64 = row.try_get("patient_id").map_err(row_error)?;
    let session_id: Option<i64> = row.try_get("session_id").map_err(row_error)?;
    let Json(differential_diagnoses): Json<Vec<String>> =
        row.try_get("differential_diagnoses").map_err(row_error)?;
    let Json(ruling_out): Json<Vec<String>> = row.try_get("ruling_out").map_err(row_error)?;
    let Json(diagnostic_criteria): Json<serde_json::Value> =
        row.try_get("diagnostic_criteria").map_err(row_error)?;
    let created_date: chrono::DateTime<chrono::Utc> =
        row.try_get("created_date").map_err(row_error)?;
    let updated_date: chrono::DateTime<chrono::Utc> =
        row.try_get("updated_date").map_err(row_error)?;

    Ok(DiagnosisRecord {
        id: DiagnosisId::new(id),
        patient_id: PatientId::new(patient_id),
        session_id: session_id.map(SessionId::new),
        diagnosis_code: row.try_get("diagnosis_code").map_err(row_error)?,
        diagnosis_name: row.try_get("diagnosis_name").map_err(row_error)?,
        severity: row.try_get("severity").map_err(row_error)?,
        confidence_level: row.try_get("confidence_level").map_err(row_error)?,
        supporting_evidence: row.try_get("supporting_evidence").map_err(row_error)?,
        differential_diagnoses,
        ruling_out,
        clinical_notes: row.try_get("clinical_notes").map_err(row_error)?,
        diagnostic_criteria,
        diagnosed_by: row.try_get("diagnosed_by").map_err(row_error)?,
        status: row.try_get("status").map_err(row_error)?,
        created_date: Timestamp::from_datetime(created_date),
        updated_date: Timestamp::from_datetime(updated_date),
    })
}
