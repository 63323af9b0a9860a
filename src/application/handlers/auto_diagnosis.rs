//! AutoDiagnosisHandler - Generates a diagnosis record from a transcript.

use std::sync::Arc;

use crate::application::prompts;
use crate::domain::diagnosis::{extract_json_object, AutoDiagnosis, DiagnosisRecord};
use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::ports::{
    AiProvider, CompletionRequest, DiagnosisRepository, PatientRepository,
    TherapySessionRepository,
};

/// Command to generate an automated diagnosis for a session.
#[derive(Debug, Clone)]
pub struct AutoDiagnosisCommand {
    pub session_id: SessionId,
}

/// Handler for automated diagnosis generation.
pub struct AutoDiagnosisHandler {
    sessions: Arc<dyn TherapySessionRepository>,
    patients: Arc<dyn PatientRepository>,
    diagnoses: Arc<dyn DiagnosisRepository>,
    ai: Arc<dyn AiProvider>,
}

impl AutoDiagnosisHandler {
    pub fn new(
        sessions: Arc<dyn TherapySessionRepository>,
        patients: Arc<dyn PatientRepository>,
        diagnoses: Arc<dyn DiagnosisRepository>,
        ai: Arc<dyn AiProvider>,
    ) -> Self {
        Self {
            sessions,
            patients,
            diagnoses,
            ai,
        }
    }

    /// Asks the model for a structured diagnostic assessment of the
    /// session and persists the parsed result.
    ///
    /// Unlike the conversational loop, diagnosis generation has no
    /// degraded fallback: a model or parse failure surfaces as an error.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` / `PatientNotFound` when either record is missing
    /// - `EmptyConversation` when the session has no history to analyze
    /// - `AIProviderError` when the completion fails
    /// - `ParseFailure` when no diagnosis can be parsed from the reply
    pub async fn handle(
        &self,
        cmd: AutoDiagnosisCommand,
    ) -> Result<DiagnosisRecord, DomainError> {
        let session = self
            .sessions
            .find_by_id(cmd.session_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::SessionNotFound, "Session not found"))?;

        if session.exchanges().is_empty() {
            return Err(DomainError::new(
                ErrorCode::EmptyConversation,
                "No conversation history to analyze",
            ));
        }

        let patient = self
            .patients
            .find_by_id(session.patient_id())
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::PatientNotFound, "Patient not found"))?;

        let prompt = prompts::auto_diagnosis(
            &patient.name,
            session.detected_symptoms(),
            session.exchanges(),
            session.assessment_report(),
        );

        let response = self
            .ai
            .complete(CompletionRequest::new(prompt))
            .await
            .map_err(|err| {
                DomainError::new(
                    ErrorCode::AIProviderError,
                    format!("Diagnosis generation failed: {}", err),
                )
            })?;

        let assessment: AutoDiagnosis = extract_json_object(&response.content)
            .and_then(|json| serde_json::from_str(json).ok())
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ParseFailure,
                    "Failed to parse AI diagnosis response",
                )
            })?;

        self.diagnoses
            .create_automated(session.patient_id(), session.id(), &assessment)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiProvider;
    use crate::adapters::memory::{
        InMemoryDiagnosisRepository, InMemoryPatientRepository, InMemoryTherapySessionRepository,
    };
    use crate::domain::detection::analyze_utterance;

    struct Fixture {
        handler: AutoDiagnosisHandler,
        diagnoses: Arc<InMemoryDiagnosisRepository>,
        session_id: SessionId,
    }

    async fn fixture(ai: MockAiProvider, with_history: bool) -> Fixture {
        let patients = Arc::new(InMemoryPatientRepository::new());
        let sessions = Arc::new(InMemoryTherapySessionRepository::new());
        let diagnoses = Arc::new(InMemoryDiagnosisRepository::new());

        let patient = patients.create("Alex").await.unwrap();
        let mut session = sessions.create(patient.id).await.unwrap();
        if with_history {
            session
                .record_exchange(
                    "I worry constantly and can't sleep",
                    "Tell me more",
                    analyze_utterance("I worry constantly and can't sleep"),
                    false,
                )
                .unwrap();
            sessions.update(&session).await.unwrap();
        }

        Fixture {
            handler: AutoDiagnosisHandler::new(sessions, patients, diagnoses.clone(), Arc::new(ai)),
            diagnoses,
            session_id: session.id(),
        }
    }

    const DIAGNOSIS_REPLY: &str = r#"Here is my assessment:
{
    "primary_diagnosis": "Generalized Anxiety Disorder",
    "diagnosis_code": "F41.1",
    "severity": "moderate",
    "confidence_level": "probable",
    "supporting_evidence": "Persistent worry, sleep disturbance",
    "differential_diagnoses": ["Adjustment disorder"],
    "ruling_out": ["Panic disorder"],
    "clinical_notes": "Monitor sleep patterns",
    "recommendations": "Weekly CBT focused on worry exposure"
}"#;

    #[tokio::test]
    async fn parses_and_persists_the_generated_diagnosis() {
        let ai = MockAiProvider::new().with_response(DIAGNOSIS_REPLY);
        let fixture = fixture(ai, true).await;

        let record = fixture
            .handler
            .handle(AutoDiagnosisCommand {
                session_id: fixture.session_id,
            })
            .await
            .unwrap();

        assert_eq!(record.diagnosis_name, "Generalized Anxiety Disorder");
        assert_eq!(record.diagnosed_by, "AI_System_Auto");
        assert_eq!(record.session_id, Some(fixture.session_id));
        assert_eq!(
            record.diagnostic_criteria,
            serde_json::json!("Weekly CBT focused on worry exposure")
        );

        let stored = fixture
            .diagnoses
            .find_by_session(fixture.session_id)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn empty_conversation_is_rejected() {
        let fixture = fixture(MockAiProvider::new(), false).await;

        let err = fixture
            .handler
            .handle(AutoDiagnosisCommand {
                session_id: fixture.session_id,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::EmptyConversation);
    }

    #[tokio::test]
    async fn unparseable_reply_is_a_parse_failure() {
        let ai = MockAiProvider::new().with_response("I cannot provide a diagnosis.");
        let fixture = fixture(ai, true).await;

        let err = fixture
            .handler
            .handle(AutoDiagnosisCommand {
                session_id: fixture.session_id,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ParseFailure);
        assert_eq!(err.message, "Failed to parse AI diagnosis response");
    }

    #[tokio::test]
    async fn model_failure_surfaces_as_provider_error() {
        let fixture = fixture(MockAiProvider::failing(), true).await;

        let err = fixture
            .handler
            .handle(AutoDiagnosisCommand {
                session_id: fixture.session_id,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::AIProviderError);
    }

    #[tokio::test]
    async fn unknown_session_is_rejected() {
        let fixture = fixture(MockAiProvider::new(), true).await;

        let err = fixture
            .handler
            .handle(AutoDiagnosisCommand {
                session_id: SessionId::new(999),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::SessionNotFound);
    }
}
