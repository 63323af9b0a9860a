//! TreatmentPlanner - Generates goals and homework from a transcript.
//!
//! Runs when the session reaches the homework assignment phase. Asks
//! the model for three SMART goals and one homework assignment, parses
//! the numbered/bracketed reply format, and persists each created
//! record before returning the plan summary for the session.

use std::sync::Arc;

use crate::application::prompts;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::session::TherapySession;
use crate::domain::treatment::{
    parse_goal_lines, parse_homework_line, HomeworkSummary, TreatmentPlan,
};
use crate::ports::{AiProvider, CompletionRequest, GoalRepository, HomeworkRepository};

/// Generates and persists treatment plans.
pub struct TreatmentPlanner {
    goals: Arc<dyn GoalRepository>,
    homework: Arc<dyn HomeworkRepository>,
    ai: Arc<dyn AiProvider>,
}

impl TreatmentPlanner {
    pub fn new(
        goals: Arc<dyn GoalRepository>,
        homework: Arc<dyn HomeworkRepository>,
        ai: Arc<dyn AiProvider>,
    ) -> Self {
        Self {
            goals,
            homework,
            ai,
        }
    }

    /// Generates goals and a homework assignment for the session,
    /// persisting each created record.
    ///
    /// # Errors
    ///
    /// - `AIProviderError` if either generation call fails
    /// - `DatabaseError` if a created record cannot be persisted
    pub async fn generate(
        &self,
        session: &TherapySession,
        patient_name: &str,
    ) -> Result<TreatmentPlan, DomainError> {
        let goal_labels = self.generate_goals(session, patient_name).await?;
        let homework = self
            .generate_homework(session, patient_name, &goal_labels)
            .await?;

        Ok(TreatmentPlan::new(goal_labels, homework))
    }

    async fn generate_goals(
        &self,
        session: &TherapySession,
        patient_name: &str,
    ) -> Result<Vec<String>, DomainError> {
        let prompt = prompts::treatment_goals(
            patient_name,
            session.exchanges(),
            session.detected_symptoms(),
        );
        let response = self
            .ai
            .complete(CompletionRequest::new(prompt))
            .await
            .map_err(ai_failure)?;

        let mut labels = Vec::new();
        for parsed in parse_goal_lines(&response.content) {
            self.goals
                .create(
                    session.patient_id(),
                    Some(session.id()),
                    parsed.category,
                    &parsed.description,
                )
                .await?;
            labels.push(parsed.display_label());
        }

        Ok(labels)
    }

    async fn generate_homework(
        &self,
        session: &TherapySession,
        patient_name: &str,
        goal_labels: &[String],
    ) -> Result<HomeworkSummary, DomainError> {
        let prompt =
            prompts::homework_assignment(patient_name, session.detected_symptoms(), goal_labels);
        let response = self
            .ai
            .complete(CompletionRequest::new(prompt))
            .await
            .map_err(ai_failure)?;

        let parsed = parse_homework_line(&response.content);
        self.homework
            .create(
                session.patient_id(),
                session.id(),
                &parsed.assignment_type,
                &parsed.description,
            )
            .await?;

        Ok(HomeworkSummary {
            assignment_type: parsed.assignment_type,
            description: parsed.description,
        })
    }
}

fn ai_failure(err: crate::ports::AiError) -> DomainError {
    DomainError::new(
        ErrorCode::AIProviderError,
        format!("Treatment plan generation failed: {}", err),
    )
}
