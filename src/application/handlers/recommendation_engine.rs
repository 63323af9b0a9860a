//! Recommendation generation.
//!
//! `RecommendationEngine` wraps the model calls for conversation
//! analysis and content/lifestyle suggestion generation. Every call
//! degrades to a deterministic fallback on model or parse failure, so
//! the engine itself is infallible.
//!
//! `GenerateRecommendationsHandler` runs the full pipeline for a
//! session and stores the assembled bundle on the aggregate.

use std::sync::Arc;
use tracing::warn;

use crate::application::prompts;
use crate::domain::diagnosis::extract_json_object;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::recommendation::{
    extract_json_array, ContentRecommendation, LifestyleRecommendation, RecommendationBundle,
    SessionAnalysis,
};
use crate::domain::session::Exchange;
use crate::domain::treatment::{HomeworkAssignment, TreatmentGoal};
use crate::ports::{
    AiProvider, CompletionRequest, GoalRepository, HomeworkRepository, PatientRepository,
    TherapySessionRepository,
};

/// Content recommendations requested when no count is given.
pub const DEFAULT_CONTENT_COUNT: usize = 5;

/// Lifestyle recommendations requested when no count is given.
pub const DEFAULT_LIFESTYLE_COUNT: usize = 6;

/// Homework history window fed into lifestyle generation.
const RECENT_HOMEWORK_LIMIT: u32 = 5;

/// Model-backed recommendation generation with deterministic fallbacks.
pub struct RecommendationEngine {
    ai: Arc<dyn AiProvider>,
}

impl RecommendationEngine {
    pub fn new(ai: Arc<dyn AiProvider>) -> Self {
        Self { ai }
    }

    /// Extracts themes, symptoms, and motivation signals from the
    /// conversation. Falls back to a keyword scan of the transcript.
    pub async fn analyze_conversation(&self, exchanges: &[Exchange]) -> SessionAnalysis {
        let prompt = prompts::keyword_extraction(exchanges);

        match self.ai.complete(CompletionRequest::new(prompt)).await {
            Ok(response) => extract_json_object(&response.content)
                .and_then(|json| serde_json::from_str(json).ok())
                .unwrap_or_else(|| {
                    warn!("conversation analysis reply unparseable, using keyword fallback");
                    SessionAnalysis::fallback(&prompts::full_dialogue(exchanges))
                }),
            Err(err) => {
                warn!(error = %err, "conversation analysis failed, using keyword fallback");
                SessionAnalysis::fallback(&prompts::full_dialogue(exchanges))
            }
        }
    }

    /// Generates educational content suggestions for the analysis.
    pub async fn content_recommendations(
        &self,
        analysis: &SessionAnalysis,
        count: usize,
    ) -> Vec<ContentRecommendation> {
        let prompt = prompts::content_recommendations(analysis, count);

        match self.ai.complete(CompletionRequest::new(prompt)).await {
            Ok(response) => extract_json_array(&response.content)
                .and_then(|json| serde_json::from_str(json).ok())
                .unwrap_or_else(|| {
                    warn!("content recommendation reply unparseable, using fallback set");
                    ContentRecommendation::fallback_set(analysis)
                }),
            Err(err) => {
                warn!(error = %err, "content recommendation generation failed, using fallback set");
                ContentRecommendation::fallback_set(analysis)
            }
        }
    }

    /// Generates lifestyle activity suggestions aligned with the
    /// patient's goals and recent homework.
    pub async fn lifestyle_recommendations(
        &self,
        analysis: &SessionAnalysis,
        goals: &[TreatmentGoal],
        homework: &[HomeworkAssignment],
        count: usize,
    ) -> Vec<LifestyleRecommendation> {
        let prompt = prompts::lifestyle_recommendations(analysis, goals, homework, count);

        match self.ai.complete(CompletionRequest::new(prompt)).await {
            Ok(response) => extract_json_array(&response.content)
                .and_then(|json| serde_json::from_str(json).ok())
                .unwrap_or_else(|| {
                    warn!("lifestyle recommendation reply unparseable, using fallback set");
                    LifestyleRecommendation::fallback_set(analysis)
                }),
            Err(err) => {
                warn!(error = %err, "lifestyle recommendation generation failed, using fallback set");
                LifestyleRecommendation::fallback_set(analysis)
            }
        }
    }
}

/// Command to generate and store a full recommendation bundle.
#[derive(Debug, Clone)]
pub struct GenerateRecommendationsCommand {
    pub session_id: SessionId,
    pub content_count: usize,
    pub lifestyle_count: usize,
}

impl GenerateRecommendationsCommand {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            content_count: DEFAULT_CONTENT_COUNT,
            lifestyle_count: DEFAULT_LIFESTYLE_COUNT,
        }
    }
}

/// Result of a generated bundle.
#[derive(Debug, Clone)]
pub struct GenerateRecommendationsResult {
    pub session_id: SessionId,
    pub patient_name: String,
    pub bundle: RecommendationBundle,
}

/// Handler running the full recommendation pipeline for a session.
pub struct GenerateRecommendationsHandler {
    sessions: Arc<dyn TherapySessionRepository>,
    patients: Arc<dyn PatientRepository>,
    goals: Arc<dyn GoalRepository>,
    homework: Arc<dyn HomeworkRepository>,
    engine: RecommendationEngine,
}

impl GenerateRecommendationsHandler {
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
            goals,
            homework,
            engine: RecommendationEngine::new(ai),
        }
    }

    /// Analyzes the session, generates both recommendation sets, and
    /// stores the assembled bundle on the session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` / `PatientNotFound` when either record is missing
    /// - `EmptyConversation` when the session has no history to analyze
    /// - `DatabaseError` when storing the bundle fails
    pub async fn handle(
        &self,
        cmd: GenerateRecommendationsCommand,
    ) -> Result<GenerateRecommendationsResult, DomainError> {
        let mut session = self
            .sessions
            .find_by_id(cmd.session_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::SessionNotFound, "Session not found"))?;

        if session.exchanges().is_empty() {
            return Err(DomainError::new(
                ErrorCode::EmptyConversation,
                "Session has no conversation history to analyze",
            ));
        }

        let patient = self
            .patients
            .find_by_id(session.patient_id())
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::PatientNotFound, "Patient not found"))?;

        let analysis = self.engine.analyze_conversation(session.exchanges()).await;
        let content = self
            .engine
            .content_recommendations(&analysis, cmd.content_count)
            .await;

        let active_goals = self.goals.find_active_by_patient(session.patient_id()).await?;
        let recent_homework = self
            .homework
            .find_recent_by_patient(session.patient_id(), RECENT_HOMEWORK_LIMIT)
            .await?;
        let lifestyle = self
            .engine
            .lifestyle_recommendations(
                &analysis,
                &active_goals,
                &recent_homework,
                cmd.lifestyle_count,
            )
            .await;

        let bundle = RecommendationBundle::assemble(analysis, content, lifestyle);
        session.set_recommendations(bundle.clone());
        self.sessions.update(&session).await?;

        Ok(GenerateRecommendationsResult {
            session_id: session.id(),
            patient_name: patient.name,
            bundle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiProvider;
    use crate::adapters::memory::{
        InMemoryGoalRepository, InMemoryHomeworkRepository, InMemoryPatientRepository,
        InMemoryTherapySessionRepository,
    };
    use crate::domain::detection::analyze_utterance;

    const ANALYSIS_REPLY: &str = r#"{
        "primary_symptoms": ["anxiety"],
        "secondary_concerns": ["sleep"],
        "therapeutic_themes": ["worry management"],
        "coping_challenges": ["racing thoughts at night"],
        "strengths": ["help-seeking"],
        "learning_needs": ["relaxation skills"],
        "emotional_state": "anxious but engaged",
        "behavioral_patterns": ["late-night rumination"],
        "triggers": ["work deadlines"],
        "motivation_level": "high",
        "session_summary": "Anxiety centered on work with sleep impact."
    }"#;

    const CONTENT_REPLY: &str = r#"[
        {
            "title": "Understanding Anxiety",
            "description": "Explains the anxiety cycle",
            "content_type": "youtube",
            "search_query": "understanding anxiety cycle",
            "relevance_reason": "Matches primary symptom",
            "estimated_duration": "15 minutes"
        }
    ]"#;

    const LIFESTYLE_REPLY: &str = r#"[
        {
            "title": "Evening Wind-Down Routine",
            "description": "A consistent pre-sleep routine",
            "activity_type": "self_care",
            "instructions": "Dim lights and read for 20 minutes before bed",
            "frequency": "daily",
            "duration": "30 minutes",
            "difficulty_level": "beginner",
            "relates_to_goal": null,
            "relates_to_homework": null
        }
    ]"#;

    struct Fixture {
        handler: GenerateRecommendationsHandler,
        sessions: Arc<InMemoryTherapySessionRepository>,
        session_id: SessionId,
    }

    async fn fixture(ai: MockAiProvider, with_history: bool) -> Fixture {
        let patients = Arc::new(InMemoryPatientRepository::new());
        let sessions = Arc::new(InMemoryTherapySessionRepository::new());
        let goals = Arc::new(InMemoryGoalRepository::new());
        let homework = Arc::new(InMemoryHomeworkRepository::new());

        let patient = patients.create("Alex").await.unwrap();
        let mut session = sessions.create(patient.id).await.unwrap();
        if with_history {
            session
                .record_exchange(
                    "I'm anxious and can't sleep",
                    "Tell me more",
                    analyze_utterance("I'm anxious and can't sleep"),
                    false,
                )
                .unwrap();
            sessions.update(&session).await.unwrap();
        }

        Fixture {
            handler: GenerateRecommendationsHandler::new(
                sessions.clone(),
                patients,
                goals,
                homework,
                Arc::new(ai),
            ),
            sessions,
            session_id: session.id(),
        }
    }

    #[tokio::test]
    async fn generates_and_stores_the_bundle() {
        let ai = MockAiProvider::new()
            .with_response(ANALYSIS_REPLY)
            .with_response(CONTENT_REPLY)
            .with_response(LIFESTYLE_REPLY);
        let fixture = fixture(ai, true).await;

        let result = fixture
            .handler
            .handle(GenerateRecommendationsCommand::new(fixture.session_id))
            .await
            .unwrap();

        assert_eq!(result.patient_name, "Alex");
        assert_eq!(
            result.bundle.session_analysis.primary_symptoms,
            vec!["anxiety"]
        );
        assert_eq!(result.bundle.content_recommendations.len(), 1);
        assert_eq!(
            result.bundle.lifestyle_recommendations[0].title,
            "Evening Wind-Down Routine"
        );
        assert_eq!(
            result.bundle.recommendation_metadata.motivation_level,
            "high"
        );

        let stored = fixture
            .sessions
            .find_by_id(fixture.session_id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.recommendations().is_some());
    }

    #[tokio::test]
    async fn empty_conversation_is_rejected() {
        let fixture = fixture(MockAiProvider::new(), false).await;

        let err = fixture
            .handler
            .handle(GenerateRecommendationsCommand::new(fixture.session_id))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::EmptyConversation);
    }

    #[tokio::test]
    async fn model_failure_degrades_every_stage_to_fallbacks() {
        let fixture = fixture(MockAiProvider::failing(), true).await;

        let result = fixture
            .handler
            .handle(GenerateRecommendationsCommand::new(fixture.session_id))
            .await
            .unwrap();

        let bundle = &result.bundle;
        // Keyword fallback picks anxiety and sleep out of the transcript.
        assert!(bundle.session_analysis.mentions_symptom("anxiety"));
        assert!(bundle
            .session_analysis
            .secondary_concerns
            .contains(&"sleep".to_string()));

        // Fallback sets include the anxiety-specific entries.
        assert!(bundle
            .content_recommendations
            .iter()
            .any(|c| c.content_type == "youtube"));
        assert!(bundle
            .lifestyle_recommendations
            .iter()
            .any(|l| l.title == "Progressive Muscle Relaxation"));
    }

    #[tokio::test]
    async fn unparseable_analysis_falls_back_but_later_stages_still_run() {
        let ai = MockAiProvider::new()
            .with_response("no json at all")
            .with_response(CONTENT_REPLY)
            .with_response(LIFESTYLE_REPLY);
        let fixture = fixture(ai, true).await;

        let result = fixture
            .handler
            .handle(GenerateRecommendationsCommand::new(fixture.session_id))
            .await
            .unwrap();

        assert!(result.bundle.session_analysis.mentions_symptom("anxiety"));
        assert_eq!(result.bundle.content_recommendations.len(), 1);
    }
}
