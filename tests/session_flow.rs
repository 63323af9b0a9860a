//! Integration tests for the therapy session lifecycle.
//!
//! These tests wire the application handlers against the in-memory
//! repositories and a scripted model provider, then walk a session
//! through its phases the way the HTTP surface would:
//! 1. Start a session and exchange messages through the intake phase
//! 2. Cross the assessment threshold and verify the stored report
//! 3. Reach the homework phase and verify the generated plan
//! 4. Complete the session and derive diagnosis and recommendations

use std::sync::Arc;

use maya_therapy::adapters::ai::MockAiProvider;
use maya_therapy::adapters::memory::{
    InMemoryDiagnosisRepository, InMemoryGoalRepository, InMemoryHomeworkRepository,
    InMemoryPatientRepository, InMemoryTherapySessionRepository,
};
use maya_therapy::application::handlers::{
    format_transcript, AdvanceSessionCommand, AdvanceSessionHandler, AutoDiagnosisCommand,
    AutoDiagnosisHandler, GenerateRecommendationsCommand, GenerateRecommendationsHandler,
    StartSessionCommand, StartSessionHandler, FALLBACK_REPLY,
};
use maya_therapy::domain::assessment::Instrument;
use maya_therapy::domain::detection::analyze_utterance;
use maya_therapy::domain::foundation::SessionId;
use maya_therapy::domain::session::SessionPhase;
use maya_therapy::ports::{
    DiagnosisRepository, GoalRepository, HomeworkRepository, PatientRepository,
    TherapySessionRepository,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct World {
    patients: Arc<InMemoryPatientRepository>,
    sessions: Arc<InMemoryTherapySessionRepository>,
    goals: Arc<InMemoryGoalRepository>,
    homework: Arc<InMemoryHomeworkRepository>,
    diagnoses: Arc<InMemoryDiagnosisRepository>,
    ai: Arc<MockAiProvider>,
}

impl World {
    fn new(ai: MockAiProvider) -> Self {
        Self {
            patients: Arc::new(InMemoryPatientRepository::new()),
            sessions: Arc::new(InMemoryTherapySessionRepository::new()),
            goals: Arc::new(InMemoryGoalRepository::new()),
            homework: Arc::new(InMemoryHomeworkRepository::new()),
            diagnoses: Arc::new(InMemoryDiagnosisRepository::new()),
            ai: Arc::new(ai),
        }
    }

    fn start_handler(&self) -> StartSessionHandler {
        StartSessionHandler::new(self.patients.clone(), self.sessions.clone(), self.ai.clone())
    }

    fn advance_handler(&self) -> AdvanceSessionHandler {
        AdvanceSessionHandler::new(
            self.sessions.clone(),
            self.patients.clone(),
            self.goals.clone(),
            self.homework.clone(),
            self.ai.clone(),
        )
    }

    /// Seeds a session with exchanges recorded directly on the
    /// aggregate, skipping the model round-trips.
    async fn preload_exchanges(&self, session_id: SessionId, count: usize, utterance: &str) {
        let mut session = self
            .sessions
            .find_by_id(session_id)
            .await
            .unwrap()
            .unwrap();
        for _ in 0..count {
            session
                .record_exchange(utterance, "noted", analyze_utterance(utterance), false)
                .unwrap();
        }
        self.sessions.update(&session).await.unwrap();
    }
}

async fn advance(
    handler: &AdvanceSessionHandler,
    session_id: SessionId,
    message: &str,
) -> maya_therapy::application::handlers::AdvanceSessionResult {
    handler
        .handle(AdvanceSessionCommand {
            session_id,
            message: message.to_string(),
        })
        .await
        .unwrap()
}

// =============================================================================
// Intake through assessment
// =============================================================================

#[tokio::test]
async fn intake_conversation_crosses_into_assessment_with_a_scored_report() {
    let ai = MockAiProvider::new()
        .with_response("Hello Alex, what brings you in today?")
        .with_response("That sounds heavy. Tell me more.")
        .with_response("When did the worry start?")
        .with_response("How does it show up in your body?")
        .with_response("What helps, even a little?")
        .with_response("Who do you have around you?")
        .with_response("Let's look at this more closely together.")
        // GAD-7 simulation for the assessment entry effect.
        .with_response("2 1 2 1 2 1 2");
    let world = World::new(ai);

    let patient = world.patients.create("Alex").await.unwrap();
    let started = world
        .start_handler()
        .handle(StartSessionCommand {
            patient_id: patient.id,
        })
        .await
        .unwrap();

    assert_eq!(started.patient_name, "Alex");
    assert_eq!(started.phase, SessionPhase::Intake);
    assert_eq!(started.initial_message, "Hello Alex, what brings you in today?");

    let handler = world.advance_handler();
    let messages = [
        "I've been anxious about work for months",
        "My chest gets tight in meetings",
        "I can't sleep before deadlines",
        "I keep worrying something will go wrong",
        "Walking helps a bit",
        "My sister checks in on me",
    ];

    let mut last = None;
    for message in messages {
        last = Some(advance(&handler, started.session_id, message).await);
    }
    let last = last.unwrap();

    assert!(last.phase_changed);
    assert_eq!(last.phase, SessionPhase::Assessment);
    assert_eq!(last.conversation_count, 6);
    assert!(last.detected_symptoms.contains(&"anxiety".to_string()));

    let stored = world
        .sessions
        .find_by_id(started.session_id)
        .await
        .unwrap()
        .unwrap();
    let report = stored.assessment_report().expect("report attached on entry");
    let gad7 = report.get(Instrument::Gad7).expect("GAD-7 scored");
    assert_eq!(gad7.total_score, 11);
    assert_eq!(gad7.severity, "Moderate anxiety");
}

#[tokio::test]
async fn model_outage_at_the_threshold_keeps_the_phase_schedule() {
    let world = World::new(MockAiProvider::failing());

    let patient = world.patients.create("Alex").await.unwrap();
    let session = world.sessions.create(patient.id).await.unwrap();
    world
        .preload_exchanges(session.id(), 5, "I feel anxious about everything")
        .await;

    let result = advance(&world.advance_handler(), session.id(), "still anxious").await;

    // Fallback exchanges don't count toward phase transitions, so the
    // sixth message leaves the session in intake with no report.
    assert_eq!(result.response, FALLBACK_REPLY);
    assert!(!result.phase_changed);
    assert_eq!(result.phase, SessionPhase::Intake);

    let stored = world
        .sessions
        .find_by_id(session.id())
        .await
        .unwrap()
        .unwrap();
    assert!(stored.assessment_report().is_none());
}

#[tokio::test]
async fn crisis_detection_survives_a_model_outage() {
    let world = World::new(MockAiProvider::failing());

    let patient = world.patients.create("Alex").await.unwrap();
    let session = world.sessions.create(patient.id).await.unwrap();

    let result = advance(
        &world.advance_handler(),
        session.id(),
        "Sometimes I think about ending my life",
    )
    .await;

    // The reply degrades but the lexical crisis check still fires.
    assert_eq!(result.response, FALLBACK_REPLY);
    assert!(result.crisis_alert.is_some());

    let stored = world
        .sessions
        .find_by_id(session.id())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.crisis_flags(), &["crisis_detected".to_string()]);
}

// =============================================================================
// Treatment planning
// =============================================================================

#[tokio::test]
async fn homework_phase_entry_persists_goals_and_an_assignment() {
    let ai = MockAiProvider::new()
        .with_response("Let's set up what you'll practice this week.")
        .with_response(
            "1. [Symptom] Reduce worry episodes to twice a week\n\
             2. [Behavioral] Take a daily twenty-minute walk\n\
             3. [Functional] Plan one social activity each week",
        )
        .with_response("[Thought Record] Log anxious thoughts each evening");
    let world = World::new(ai);

    let patient = world.patients.create("Alex").await.unwrap();
    let session = world.sessions.create(patient.id).await.unwrap();
    world
        .preload_exchanges(session.id(), 21, "the techniques are helping")
        .await;

    let result = advance(&world.advance_handler(), session.id(), "what should I practice").await;

    assert!(result.phase_changed);
    assert_eq!(result.phase, SessionPhase::HomeworkAssignment);

    let goals = world.goals.find_by_session(session.id()).await.unwrap();
    assert_eq!(goals.len(), 3);
    assert!(goals.iter().all(|g| g.is_active()));

    let assignments = world.homework.find_by_session(session.id()).await.unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].assignment_type, "thought_record");
    assert!(!assignments[0].completed);

    let stored = world
        .sessions
        .find_by_id(session.id())
        .await
        .unwrap()
        .unwrap();
    let plan = stored.treatment_plan().expect("plan attached");
    assert_eq!(plan.goals.len(), 3);
}

// =============================================================================
// Completion and derived artifacts
// =============================================================================

#[tokio::test]
async fn completed_session_supports_diagnosis_recommendations_and_export() {
    let diagnosis_reply = r#"Here is my assessment:
{
  "primary_diagnosis": "Generalized Anxiety Disorder",
  "diagnosis_code": "F41.1",
  "severity": "moderate",
  "confidence_level": "probable",
  "supporting_evidence": "Persistent worry with somatic tension",
  "differential_diagnoses": ["Adjustment Disorder"],
  "ruling_out": ["Panic Disorder"],
  "clinical_notes": "Reassess after four weeks",
  "recommendations": {"therapy": "CBT"}
}"#;
    let analysis_reply = r#"{
  "primary_symptoms": ["anxiety"],
  "secondary_concerns": ["sleep"],
  "therapeutic_themes": ["worry management"],
  "coping_challenges": ["deadline pressure"],
  "strengths": ["family support"],
  "learning_needs": ["relaxation skills"],
  "emotional_state": "anxious but engaged",
  "behavioral_patterns": ["avoidance before meetings"],
  "triggers": ["work deadlines"],
  "motivation_level": "high",
  "session_summary": "Anxiety centered on work with good engagement."
}"#;
    let content_reply = r#"[{
  "title": "Understanding the Worry Cycle",
  "description": "A short primer on how worry sustains itself",
  "content_type": "article",
  "search_query": "worry cycle cbt",
  "relevance_reason": "Matches the primary anxiety theme",
  "estimated_duration": "10 minutes"
}]"#;
    let lifestyle_reply = r#"[{
  "title": "Evening Wind-Down",
  "description": "A fixed routine before bed",
  "activity_type": "sleep_hygiene",
  "instructions": "Screens off an hour before sleep",
  "frequency": "daily",
  "duration": "30 minutes",
  "difficulty_level": "easy"
}]"#;

    let ai = MockAiProvider::new()
        .with_response("Take care of yourself, Alex.")
        .with_response(diagnosis_reply)
        .with_response(analysis_reply)
        .with_response(content_reply)
        .with_response(lifestyle_reply);
    let world = World::new(ai);

    let patient = world.patients.create("Alex").await.unwrap();
    let session = world.sessions.create(patient.id).await.unwrap();
    world
        .preload_exchanges(session.id(), 26, "I feel anxious but hopeful")
        .await;

    let result = advance(&world.advance_handler(), session.id(), "thank you").await;
    assert!(result.session_completed);
    assert_eq!(result.phase, SessionPhase::Completed);

    // Automated diagnosis over the finished transcript.
    let diagnosis_handler = AutoDiagnosisHandler::new(
        world.sessions.clone(),
        world.patients.clone(),
        world.diagnoses.clone(),
        world.ai.clone(),
    );
    let record = diagnosis_handler
        .handle(AutoDiagnosisCommand {
            session_id: session.id(),
        })
        .await
        .unwrap();
    assert_eq!(record.diagnosis_name, "Generalized Anxiety Disorder");
    assert_eq!(record.diagnosis_code.as_deref(), Some("F41.1"));

    let session_diagnoses = world.diagnoses.find_by_session(session.id()).await.unwrap();
    assert_eq!(session_diagnoses.len(), 1);

    // Recommendation bundle derived from the same conversation.
    let recommendations_handler = GenerateRecommendationsHandler::new(
        world.sessions.clone(),
        world.patients.clone(),
        world.goals.clone(),
        world.homework.clone(),
        world.ai.clone(),
    );
    let generated = recommendations_handler
        .handle(GenerateRecommendationsCommand::new(session.id()))
        .await
        .unwrap();
    assert_eq!(generated.patient_name, "Alex");
    assert_eq!(
        generated.bundle.session_analysis.primary_symptoms,
        vec!["anxiety".to_string()]
    );
    assert_eq!(generated.bundle.content_recommendations.len(), 1);
    assert_eq!(generated.bundle.lifestyle_recommendations.len(), 1);

    let stored = world
        .sessions
        .find_by_id(session.id())
        .await
        .unwrap()
        .unwrap();
    assert!(stored.recommendations().is_some());

    // Transcript export reflects the full record.
    let transcript = format_transcript(&stored, "Alex");
    assert!(transcript.contains("AI THERAPY SESSION TRANSCRIPT"));
    assert!(transcript.contains("Patient: Alex"));
    assert!(transcript.contains("Completed: Yes"));
    assert!(transcript.contains("Exchange 27"));
}
