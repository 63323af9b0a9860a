//! PostgreSQL implementation of the therapy session repository.
//!
//! The aggregate's collections (conversation history, insight log,
//! crisis flags) and attached artifacts (assessment report, treatment
//! plan, recommendation bundle) are stored as JSONB columns on the
//! session row. `total_exchanges` and `session_completed` are
//! denormalized on write so analytics can aggregate without unpacking
//! the JSON.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::assessment::AssessmentReport;
use crate::domain::foundation::{DomainError, ErrorCode, PatientId, SessionId, Timestamp};
use crate::domain::recommendation::RecommendationBundle;
use crate::domain::session::{Exchange, InsightRecord, SessionPhase, TherapySession};
use crate::domain::treatment::TreatmentPlan;
use crate::ports::TherapySessionRepository;

use super::{db_error, row_error};

const SESSION_COLUMNS: &str = r#"
    SELECT id, patient_id, current_phase, conversation_history,
           detected_symptoms, session_insights, crisis_flags,
           assessment_results, generated_goals, recommendation_data,
           session_date
    FROM therapy_sessions
"#;

#[derive(Clone)]
pub struct PostgresTherapySessionRepository {
    pool: PgPool,
}

impl PostgresTherapySessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TherapySessionRepository for PostgresTherapySessionRepository {
    async fn create(&self, patient_id: PatientId) -> Result<TherapySession, DomainError> {
        let session_date = Timestamp::now();
        let row = sqlx::query(
            r#"
            INSERT INTO therapy_sessions (patient_id, session_date)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(patient_id.as_i64())
        .bind(*session_date.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create session", e))?;

        let id: i64 = row.try_get("id").map_err(row_error)?;
        Ok(TherapySession::reconstitute(
            SessionId::new(id),
            patient_id,
            SessionPhase::Intake,
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            None,
            None,
            None,
            session_date,
        ))
    }

    async fn update(&self, session: &TherapySession) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE therapy_sessions
            SET current_phase = $2,
                conversation_history = $3,
                detected_symptoms = $4,
                session_insights = $5,
                crisis_flags = $6,
                assessment_results = $7,
                generated_goals = $8,
                recommendation_data = $9,
                total_exchanges = $10,
                session_completed = $11
            WHERE id = $1
            "#,
        )
        .bind(session.id().as_i64())
        .bind(session.phase().as_str())
        .bind(Json(session.exchanges()))
        .bind(Json(session.detected_symptoms()))
        .bind(Json(session.insights()))
        .bind(Json(session.crisis_flags()))
        .bind(session.assessment_report().map(Json))
        .bind(session.treatment_plan().map(Json))
        .bind(session.recommendations().map(Json))
        .bind(session.exchange_count() as i32)
        .bind(session.is_completed())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update session", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                "Session not found",
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: SessionId) -> Result<Option<TherapySession>, DomainError> {
        let query = format!("{} WHERE id = $1", SESSION_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch session", e))?;

        row.map(row_to_session).transpose()
    }

    async fn find_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<TherapySession>, DomainError> {
        let query = format!(
            "{} WHERE patient_id = $1 ORDER BY session_date DESC, id DESC",
            SESSION_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(patient_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list sessions", e))?;

        rows.into_iter().map(row_to_session).collect()
    }

    async fn find_recent_by_patient(
        &self,
        patient_id: PatientId,
        limit: u32,
    ) -> Result<Vec<TherapySession>, DomainError> {
        let query = format!(
            "{} WHERE patient_id = $1 ORDER BY session_date DESC, id DESC LIMIT $2",
            SESSION_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(patient_id.as_i64())
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list recent sessions", e))?;

        rows.into_iter().map(row_to_session).collect()
    }
}

fn row_to_session(row: PgRow) -> Result<TherapySession, DomainError> {
    let id: i64 = row.try_get("id").map_err(row_error)?;
    let patient_id: i64 = row.try_get("patient_id").map_err(row_error)?;
    let phase_raw: String = row.try_get("current_phase").map_err(row_error)?;
    let phase = SessionPhase::from_str(&phase_raw)
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e))?;

    let Json(exchanges): Json<Vec<Exchange>> =
        row.try_get("conversation_history").map_err(row_error)?;
    let Json(detected_symptoms): Json<Vec<String>> =
        row.try_get("detected_symptoms").map_err(row_error)?;
    let Json(insights): Json<Vec<InsightRecord>> =
        row.try_get("session_insights").map_err(row_error)?;
    let Json(crisis_flags): Json<Vec<String>> =
        row.try_get("crisis_flags").map_err(row_error)?;
    let assessment_report: Option<Json<AssessmentReport>> =
        row.try_get("assessment_results").map_err(row_error)?;
    let treatment_plan: Option<Json<TreatmentPlan>> =
        row.try_get("generated_goals").map_err(row_error)?;
    let recommendations: Option<Json<RecommendationBundle>> =
        row.try_get("recommendation_data").map_err(row_error)?;
    let session_date: chrono::DateTime<chrono::Utc> =
        row.try_get("session_date").map_err(row_error)?;

    Ok(TherapySession::reconstitute(
        SessionId::new(id),
        PatientId::new(patient_id),
        phase,
        exchanges,
        detected_symptoms,
        insights,
        crisis_flags,
        assessment_report.map(|Json(report)| report),
        treatment_plan.map(|Json(plan)| plan),
        recommendations.map(|Json(bundle)| bundle),
        Timestamp::from_datetime(session_date),
    ))
}
