//! SessionInsightsHandler - Clinical insight summaries for a session.

use std::sync::Arc;

use crate::application::prompts;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, Timestamp};
use crate::domain::session::{InsightRecord, SessionPhase};
use crate::ports::{AiProvider, CompletionRequest, PatientRepository, TherapySessionRepository};

/// Command to generate insights for a session.
#[derive(Debug, Clone)]
pub struct SessionInsightsCommand {
    pub session_id: SessionId,
}

/// Point-in-time statistics for the session under review.
#[derive(Debug, Clone)]
pub struct SessionStats {
    pub total_exchanges: u32,
    pub current_phase: SessionPhase,
    pub detected_symptoms: Vec<String>,
    pub session_completed: bool,
    pub session_date: Timestamp,
}

/// Result of an insight generation run.
#[derive(Debug, Clone)]
pub struct SessionInsightsResult {
    pub session_id: SessionId,
    pub patient_name: String,
    pub stats: SessionStats,
    pub ai_insights: String,
    pub insight_records: Vec<InsightRecord>,
}

/// Handler for clinical insight generation.
pub struct SessionInsightsHandler {
    sessions: Arc<dyn TherapySessionRepository>,
    patients: Arc<dyn PatientRepository>,
    ai: Arc<dyn AiProvider>,
}

impl SessionInsightsHandler {
    pub fn new(
        sessions: Arc<dyn TherapySessionRepository>,
        patients: Arc<dyn PatientRepository>,
        ai: Arc<dyn AiProvider>,
    ) -> Self {
        Self {
            sessions,
            patients,
            ai,
        }
    }

    /// Summarizes the session and asks the model for a clinical
    /// narrative. A model failure is reported inline in the insight
    /// text rather than failing the request.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` / `PatientNotFound` when either record is missing
    pub async fn handle(
        &self,
        cmd: SessionInsightsCommand,
    ) -> Result<SessionInsightsResult, DomainError> {
        let session = self
            .sessions
            .find_by_id(cmd.session_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::SessionNotFound, "Session not found"))?;

        let patient = self
            .patients
            .find_by_id(session.patient_id())
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::PatientNotFound, "Patient not found"))?;

        let prompt = prompts::clinical_insights(
            &patient.name,
            session.exchange_count(),
            session.phase(),
            session.detected_symptoms(),
            session.exchanges(),
        );

        let ai_insights = match self.ai.complete(CompletionRequest::new(prompt)).await {
            Ok(response) => response.content,
            Err(err) => format!("Unable to generate AI insights: {}", err),
        };

        Ok(SessionInsightsResult {
            session_id: session.id(),
            patient_name: patient.name,
            stats: SessionStats {
                total_exchanges: session.exchange_count(),
                current_phase: session.phase(),
                detected_symptoms: session.detected_symptoms().to_vec(),
                session_completed: session.is_completed(),
                session_date: session.session_date(),
            },
            ai_insights,
            insight_records: session.insights().to_vec(),
        })
    }
}
