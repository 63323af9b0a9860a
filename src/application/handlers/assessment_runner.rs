//! AssessmentRunner - Conducts automated assessments over a transcript.
//!
//! When the session reaches the assessment phase, the runner selects
//! instruments from the detected symptoms, asks the model to simulate
//! patient responses from the conversation so far, and scores them.
//! Model failures never abort the run; the affected instrument falls
//! back to a deterministic mild-symptom estimate.

use std::sync::Arc;
use tracing::warn;

use crate::application::prompts;
use crate::domain::assessment::{AssessmentReport, Instrument, ScoreResult};
use crate::domain::session::TherapySession;
use crate::ports::{AiProvider, CompletionRequest};

/// Conducts automated assessments.
pub struct AssessmentRunner {
    ai: Arc<dyn AiProvider>,
}

impl AssessmentRunner {
    pub fn new(ai: Arc<dyn AiProvider>) -> Self {
        Self { ai }
    }

    /// Runs every instrument selected for the session's symptoms and
    /// returns the combined report.
    pub async fn run(&self, session: &TherapySession) -> AssessmentReport {
        let mut report = AssessmentReport::new();

        for instrument in Instrument::select_for_symptoms(session.detected_symptoms()) {
            let result = self.score_instrument(session, instrument).await;
            report.insert(instrument, result);
        }

        report
    }

    async fn score_instrument(
        &self,
        session: &TherapySession,
        instrument: Instrument,
    ) -> ScoreResult {
        let prompt = prompts::assessment_simulation(instrument, session.exchanges());

        match self.ai.complete(CompletionRequest::new(prompt)).await {
            Ok(response) => ScoreResult::from_reply(instrument, &response.content),
            Err(err) => {
                warn!(
                    session_id = %session.id(),
                    instrument = instrument.key(),
                    error = %err,
                    "assessment simulation failed, using fallback scores"
                );
                ScoreResult::fallback(instrument)
            }
        }
    }
}
