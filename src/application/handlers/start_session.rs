//! StartSessionHandler - Opens a new interactive therapy session.

use std::sync::Arc;
use tracing::warn;

use crate::application::prompts;
use crate::domain::foundation::{DomainError, ErrorCode, PatientId, SessionId};
use crate::domain::session::SessionPhase;
use crate::ports::{AiProvider, CompletionRequest, PatientRepository, TherapySessionRepository};

/// Command to start a session for a patient.
#[derive(Debug, Clone)]
pub struct StartSessionCommand {
    pub patient_id: PatientId,
}

/// Result of a successfully started session.
#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub session_id: SessionId,
    pub patient_name: String,
    pub initial_message: String,
    pub phase: SessionPhase,
}

/// Handler for starting sessions.
pub struct StartSessionHandler {
    patients: Arc<dyn PatientRepository>,
    sessions: Arc<dyn TherapySessionRepository>,
    ai: Arc<dyn AiProvider>,
}

impl StartSessionHandler {
    pub fn new(
        patients: Arc<dyn PatientRepository>,
        sessions: Arc<dyn TherapySessionRepository>,
        ai: Arc<dyn AiProvider>,
    ) -> Self {
        Self {
            patients,
            sessions,
            ai,
        }
    }

    /// Creates an intake-phase session and generates the opening
    /// greeting. A model failure degrades to a canned greeting rather
    /// than failing the session start.
    pub async fn handle(
        &self,
        cmd: StartSessionCommand,
    ) -> Result<StartSessionResult, DomainError> {
        let patient = self
            .patients
            .find_by_id(cmd.patient_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::PatientNotFound, "Patient not found"))?;

        let session = self.sessions.create(patient.id).await?;

        let request = CompletionRequest::new(prompts::greeting(&patient.name));
        let greeting = match self.ai.complete(request).await {
            Ok(response) => response.content,
            Err(err) => {
                warn!(session_id = %session.id(), error = %err, "greeting generation failed, using fallback");
                fallback_greeting(&patient.name)
            }
        };

        Ok(StartSessionResult {
            session_id: session.id(),
            patient_name: patient.name,
            initial_message: greeting,
            phase: session.phase(),
        })
    }
}

fn fallback_greeting(patient_name: &str) -> String {
    format!(
        "Hello {patient_name}, I'm Dr. Maya. I'm so glad you're here today. \
         This is a safe space where we can talk about whatever is on your mind. \
         What brought you to therapy today?"
    )
}
