//! AdvanceSessionHandler - Processes one patient message in a session.
//!
//! The central orchestrator for the conversational loop: builds the
//! phase-specific prompt, generates the therapist reply, records the
//! exchange with its detected signals, and runs phase-entry side
//! effects (automated assessment, treatment plan generation) when the
//! exchange tips the session into a new phase.

use std::sync::Arc;
use tracing::{error, warn};

use crate::application::handlers::{AssessmentRunner, TreatmentPlanner};
use crate::application::prompts;
use crate::domain::detection::{analyze_utterance, detect_crisis};
use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::session::{SessionPhase, TherapySession};
use crate::ports::{
    AiProvider, CompletionRequest, GoalRepository, HomeworkRepository, PatientRepository,
    TherapySessionRepository,
};

/// Canned reply when the model fails mid-conversation.
pub const FALLBACK_REPLY: &str =
    "I'm having trouble processing that right now. Can you tell me more about what's on your mind?";

/// Alert text returned alongside a reply when crisis language is detected.
pub const CRISIS_ALERT: &str = "Crisis indicators detected. Please ensure patient safety.";

/// Command carrying one patient message.
#[derive(Debug, Clone)]
pub struct AdvanceSessionCommand {
    pub session_id: SessionId,
    pub message: String,
}

/// Outcome of processing one message.
#[derive(Debug, Clone)]
pub struct AdvanceSessionResult {
    pub response: String,
    pub phase: SessionPhase,
    pub phase_changed: bool,
    pub conversation_count: u32,
    pub detected_symptoms: Vec<String>,
    pub session_completed: bool,
    pub crisis_alert: Option<String>,
}

/// Handler for the conversational loop.
pub struct AdvanceSessionHandler {
    sessions: Arc<dyn TherapySessionRepository>,
    patients: Arc<dyn PatientRepository>,
    ai: Arc<dyn AiProvider>,
    assessment_runner: AssessmentRunner,
    treatment_planner: TreatmentPlanner,
}

impl AdvanceSessionHandler {
    pub fn new(
        sessions: Arc<dyn TherapySessionRepository>,
        patients: Arc<dyn PatientRepository>,
        goals: Arc<dyn GoalRepository>,
        homework: Arc<dyn HomeworkRepository>,
        ai: Arc<dyn AiProvider>,
    ) -> Self {
        Self {
            sessions,
            patients,
            assessment_runner: AssessmentRunner::new(ai.clone()),
            treatment_planner: TreatmentPlanner::new(goals, homework, ai.clone()),
            ai,
        }
    }

    /// Processes one patient message.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` / `PatientNotFound` when either record is missing
    /// - `SessionCompleted` when the session already finished
    /// - `DatabaseError` when persisting the updated session fails
    ///
    /// Model failures are not errors: the reply degrades to a canned
    /// fallback and the phase schedule is not advanced.
    pub async fn handle(
        &self,
        cmd: AdvanceSessionCommand,
    ) -> Result<AdvanceSessionResult, DomainError> {
        let mut session = self
            .sessions
            .find_by_id(cmd.session_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::SessionNotFound, "Session not found"))?;

        if session.is_completed() {
            return Err(DomainError::new(
                ErrorCode::SessionCompleted,
                "Session already completed",
            ));
        }

        let patient = self
            .patients
            .find_by_id(session.patient_id())
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::PatientNotFound, "Patient not found"))?;

        let prompt = prompts::phase_reply(
            session.phase(),
            &patient.name,
            &cmd.message,
            session.exchanges(),
            session.detected_symptoms(),
        );

        let (response, crisis_detected, transition) =
            match self.ai.complete(CompletionRequest::new(prompt)).await {
                Ok(completion) => {
                    let signals = analyze_utterance(&cmd.message);
                    let crisis = detect_crisis(&cmd.message);
                    let transition = session.record_exchange(
                        &cmd.message,
                        &completion.content,
                        signals,
                        crisis,
                    )?;
                    (completion.content, crisis, transition)
                }
                Err(err) => {
                    warn!(session_id = %session.id(), error = %err, "reply generation failed, using fallback");
                    // Crisis detection is lexical and must survive the outage.
                    let crisis = detect_crisis(&cmd.message);
                    session.record_fallback_exchange(&cmd.message, FALLBACK_REPLY, crisis)?;
                    (FALLBACK_REPLY.to_string(), crisis, None)
                }
            };

        if let Some(transition) = transition {
            self.run_phase_entry_effects(&mut session, &patient.name, transition.to)
                .await;
        }

        self.sessions.update(&session).await?;

        Ok(AdvanceSessionResult {
            response,
            phase: session.phase(),
            phase_changed: transition.is_some(),
            conversation_count: session.exchange_count(),
            detected_symptoms: session.detected_symptoms().to_vec(),
            session_completed: session.is_completed(),
            crisis_alert: crisis_detected.then(|| CRISIS_ALERT.to_string()),
        })
    }

    /// Side effects triggered on entering a phase. Failures are logged
    /// and swallowed; the conversation itself already succeeded.
    async fn run_phase_entry_effects(
        &self,
        session: &mut TherapySession,
        patient_name: &str,
        entered: SessionPhase,
    ) {
        match entered {
            SessionPhase::Assessment => {
                let report = self.assessment_runner.run(session).await;
                session.set_assessment_report(report);
            }
            SessionPhase::HomeworkAssignment => {
                match self.treatment_planner.generate(session, patient_name).await {
                    Ok(plan) => session.set_treatment_plan(plan),
                    Err(err) => {
                        error!(session_id = %session.id(), error = %err, "treatment plan generation failed");
                    }
                }
            }
            _ => {}
        }
    }
}
