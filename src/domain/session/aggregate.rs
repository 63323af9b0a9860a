//! Therapy session aggregate.
//!
//! Owns the conversation history, the accumulated symptom set, and the
//! phase state machine. All mutation goes through the aggregate so the
//! forward-only phase invariant and append-only history cannot be bypassed.

use crate::domain::assessment::AssessmentReport;
use crate::domain::detection::ConversationSignals;
use crate::domain::foundation::{DomainError, ErrorCode, PatientId, SessionId, Timestamp};
use crate::domain::recommendation::RecommendationBundle;
use crate::domain::treatment::TreatmentPlan;

use super::{Exchange, InsightRecord, SessionPhase};

/// A phase transition that occurred while recording an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: SessionPhase,
    pub to: SessionPhase,
}

/// The therapy session aggregate.
#[derive(Debug, Clone)]
pub struct TherapySession {
    id: SessionId,
    patient_id: PatientId,
    phase: SessionPhase,
    exchanges: Vec<Exchange>,
    detected_symptoms: Vec<String>,
    insights: Vec<InsightRecord>,
    crisis_flags: Vec<String>,
    assessment_report: Option<AssessmentReport>,
    treatment_plan: Option<TreatmentPlan>,
    recommendations: Option<RecommendationBundle>,
    session_date: Timestamp,
}

impl TherapySession {
    /// Creates a fresh session in the intake phase.
    pub fn new(id: SessionId, patient_id: PatientId) -> Self {
        Self {
            id,
            patient_id,
            phase: SessionPhase::Intake,
            exchanges: Vec::new(),
            detected_symptoms: Vec::new(),
            insights: Vec::new(),
            crisis_flags: Vec::new(),
            assessment_report: None,
            treatment_plan: None,
            recommendations: None,
            session_date: Timestamp::now(),
        }
    }

    /// Rebuilds a session from persisted state.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        patient_id: PatientId,
        phase: SessionPhase,
        exchanges: Vec<Exchange>,
        detected_symptoms: Vec<String>,
        insights: Vec<InsightRecord>,
        crisis_flags: Vec<String>,
        assessment_report: Option<AssessmentReport>,
        treatment_plan: Option<TreatmentPlan>,
        recommendations: Option<RecommendationBundle>,
        session_date: Timestamp,
    ) -> Self {
        Self {
            id,
            patient_id,
            phase,
            exchanges,
            detected_symptoms,
            insights,
            crisis_flags,
            assessment_report,
            treatment_plan,
            recommendations,
            session_date,
        }
    }

    // ════════════════════════════════════════════════════════════════════
    // Accessors
    // ════════════════════════════════════════════════════════════════════

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn exchange_count(&self) -> u32 {
        self.exchanges.len() as u32
    }

    pub fn detected_symptoms(&self) -> &[String] {
        &self.detected_symptoms
    }

    pub fn insights(&self) -> &[InsightRecord] {
        &self.insights
    }

    pub fn crisis_flags(&self) -> &[String] {
        &self.crisis_flags
    }

    pub fn assessment_report(&self) -> Option<&AssessmentReport> {
        self.assessment_report.as_ref()
    }

    pub fn treatment_plan(&self) -> Option<&TreatmentPlan> {
        self.treatment_plan.as_ref()
    }

    pub fn recommendations(&self) -> Option<&RecommendationBundle> {
        self.recommendations.as_ref()
    }

    pub fn session_date(&self) -> Timestamp {
        self.session_date
    }

    /// Returns true if the session has reached its terminal phase.
    pub fn is_completed(&self) -> bool {
        self.phase.is_terminal()
    }

    // ════════════════════════════════════════════════════════════════════
    // Mutations
    // ════════════════════════════════════════════════════════════════════

    /// Records a completed exchange and evaluates the phase schedule.
    ///
    /// The exchange is stamped with the phase the session was in when the
    /// patient spoke. Detected symptom tags merge into the session set
    /// without duplicates, preserving first-seen order. The crisis flag
    /// list always reflects the latest exchange only.
    ///
    /// Returns the transition taken, if the post-append exchange count
    /// reached the current phase's threshold.
    ///
    /// # Errors
    ///
    /// Returns `SessionCompleted` if the session is already terminal.
    pub fn record_exchange(
        &mut self,
        user_input: impl Into<String>,
        ai_response: impl Into<String>,
        signals: ConversationSignals,
        crisis_detected: bool,
    ) -> Result<Option<PhaseTransition>, DomainError> {
        self.ensure_active()?;

        let phase_at_exchange = self.phase;
        self.exchanges.push(Exchange::new(
            user_input,
            ai_response,
            phase_at_exchange,
            crisis_detected,
        ));

        for symptom in &signals.detected_symptoms {
            if !self.detected_symptoms.contains(symptom) {
                self.detected_symptoms.push(symptom.clone());
            }
        }

        self.insights.push(InsightRecord::new(phase_at_exchange, signals));

        self.crisis_flags = if crisis_detected {
            vec!["crisis_detected".to_string()]
        } else {
            Vec::new()
        };

        let transition = self
            .phase
            .evaluate_transition(self.exchange_count())
            .map(|next| {
                let taken = PhaseTransition {
                    from: self.phase,
                    to: next,
                };
                self.phase = next;
                taken
            });

        Ok(transition)
    }

    /// Records an exchange whose reply came from the deterministic
    /// fallback after a model failure.
    ///
    /// No signals are captured and the phase schedule is not evaluated;
    /// a degraded reply never moves the session forward. Crisis
    /// detection is lexical, so it survives the outage: the caller
    /// passes the flag and the exchange and crisis list reflect it.
    pub fn record_fallback_exchange(
        &mut self,
        user_input: impl Into<String>,
        ai_response: impl Into<String>,
        crisis_detected: bool,
    ) -> Result<(), DomainError> {
        self.ensure_active()?;

        let phase_at_exchange = self.phase;
        self.exchanges.push(Exchange::new(
            user_input,
            ai_response,
            phase_at_exchange,
            crisis_detected,
        ));
        self.insights
            .push(InsightRecord::new(phase_at_exchange, ConversationSignals::default()));
        self.crisis_flags = if crisis_detected {
            vec!["crisis_detected".to_string()]
        } else {
            Vec::new()
        };

        Ok(())
    }

    /// Attaches the automated assessment report.
    pub fn set_assessment_report(&mut self, report: AssessmentReport) {
        self.assessment_report = Some(report);
    }

    /// Attaches the generated treatment plan summary.
    pub fn set_treatment_plan(&mut self, plan: TreatmentPlan) {
        self.treatment_plan = Some(plan);
    }

    /// Attaches the generated recommendation bundle.
    pub fn set_recommendations(&mut self, bundle: RecommendationBundle) {
        self.recommendations = Some(bundle);
    }

    fn ensure_active(&self) -> Result<(), DomainError> {
        if self.is_completed() {
            return Err(DomainError::new(
                ErrorCode::SessionCompleted,
                format!("Session {} is already completed", self.id),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::detection::analyze_utterance;

    fn session() -> TherapySession {
        TherapySession::new(SessionId::new(1), PatientId::new(1))
    }

    fn plain_signals() -> ConversationSignals {
        ConversationSignals::default()
    }

    mod recording {
        use super::*;

        #[test]
        fn new_session_starts_in_intake_with_no_history() {
            let session = session();
            assert_eq!(session.phase(), SessionPhase::Intake);
            assert_eq!(session.exchange_count(), 0);
            assert!(!session.is_completed());
        }

        #[test]
        fn record_exchange_appends_to_history() {
            let mut session = session();
            session
                .record_exchange("hello", "hi there", plain_signals(), false)
                .unwrap();

            assert_eq!(session.exchange_count(), 1);
            assert_eq!(session.exchanges()[0].user_input, "hello");
            assert_eq!(session.exchanges()[0].phase, SessionPhase::Intake);
        }

        #[test]
        fn symptoms_accumulate_without_duplicates() {
            let mut session = session();
            let anxious = analyze_utterance("I feel anxious");

            session
                .record_exchange("I feel anxious", "ok", anxious.clone(), false)
                .unwrap();
            session
                .record_exchange("still anxious", "ok", anxious, false)
                .unwrap();

            assert_eq!(session.detected_symptoms(), &["anxiety".to_string()]);
        }

        #[test]
        fn symptoms_preserve_first_seen_order() {
            let mut session = session();
            session
                .record_exchange("m1", "r", analyze_utterance("work is stressful"), false)
                .unwrap();
            session
                .record_exchange("m2", "r", analyze_utterance("I feel anxious at work"), false)
                .unwrap();

            assert_eq!(
                session.detected_symptoms(),
                &["work_stress".to_string(), "anxiety".to_string()]
            );
        }

        #[test]
        fn crisis_flags_reflect_latest_exchange_only() {
            let mut session = session();
            session
                .record_exchange("dark thoughts", "support", plain_signals(), true)
                .unwrap();
            assert_eq!(session.crisis_flags(), &["crisis_detected".to_string()]);

            session
                .record_exchange("feeling calmer", "good", plain_signals(), false)
                .unwrap();
            assert!(session.crisis_flags().is_empty());
        }

        #[test]
        fn insight_records_track_each_exchange() {
            let mut session = session();
            session
                .record_exchange("m", "r", analyze_utterance("I'm worried"), false)
                .unwrap();

            assert_eq!(session.insights().len(), 1);
            assert_eq!(session.insights()[0].phase, SessionPhase::Intake);
            assert!(!session.insights()[0].insights.is_empty());
        }
    }

    mod phase_progression {
        use super::*;

        #[test]
        fn session_advances_to_assessment_on_sixth_exchange() {
            let mut session = session();
            for i in 0..5 {
                let transition = session
                    .record_exchange(format!("m{}", i), "r", plain_signals(), false)
                    .unwrap();
                assert!(transition.is_none());
            }

            let transition = session
                .record_exchange("m5", "r", plain_signals(), false)
                .unwrap()
                .expect("sixth exchange should trigger transition");

            assert_eq!(transition.from, SessionPhase::Intake);
            assert_eq!(transition.to, SessionPhase::Assessment);
            assert_eq!(session.phase(), SessionPhase::Assessment);
        }

        #[test]
        fn exchange_is_stamped_with_pre_transition_phase() {
            let mut session = session();
            for i in 0..6 {
                session
                    .record_exchange(format!("m{}", i), "r", plain_signals(), false)
                    .unwrap();
            }

            // The sixth exchange happened during intake even though it
            // moved the session to assessment.
            assert_eq!(session.exchanges()[5].phase, SessionPhase::Intake);
            assert_eq!(session.phase(), SessionPhase::Assessment);
        }

        #[test]
        fn full_schedule_walks_every_phase_in_order() {
            let mut session = session();
            let mut transitions = Vec::new();

            for i in 0..27 {
                if let Some(t) = session
                    .record_exchange(format!("m{}", i), "r", plain_signals(), false)
                    .unwrap()
                {
                    transitions.push((i + 1, t.to));
                }
            }

            assert_eq!(
                transitions,
                vec![
                    (6, SessionPhase::Assessment),
                    (12, SessionPhase::Therapy),
                    (18, SessionPhase::GoalSetting),
                    (22, SessionPhase::HomeworkAssignment),
                    (25, SessionPhase::Closing),
                    (27, SessionPhase::Completed),
                ]
            );
            assert!(session.is_completed());
        }

        #[test]
        fn completed_session_rejects_exchanges() {
            let mut session = session();
            for i in 0..27 {
                session
                    .record_exchange(format!("m{}", i), "r", plain_signals(), false)
                    .unwrap();
            }
            assert!(session.is_completed());

            let err = session
                .record_exchange("one more", "r", plain_signals(), false)
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::SessionCompleted);

            let err = session
                .record_fallback_exchange("one more", "r", false)
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::SessionCompleted);
        }
    }

    mod fallback_recording {
        use super::*;

        #[test]
        fn fallback_exchange_appends_but_never_advances_phase() {
            let mut session = session();
            for i in 0..5 {
                session
                    .record_exchange(format!("m{}", i), "r", plain_signals(), false)
                    .unwrap();
            }

            // Sixth exchange via the fallback path: count reaches the
            // threshold but the phase must not move.
            session
                .record_fallback_exchange("m5", "fallback reply", false)
                .unwrap();

            assert_eq!(session.exchange_count(), 6);
            assert_eq!(session.phase(), SessionPhase::Intake);
        }

        #[test]
        fn fallback_exchange_captures_no_signals() {
            let mut session = session();
            session
                .record_fallback_exchange("I feel anxious", "fallback reply", false)
                .unwrap();

            assert!(session.detected_symptoms().is_empty());
            assert!(session.insights()[0].insights.is_empty());
        }

        #[test]
        fn fallback_exchange_carries_the_crisis_flag() {
            let mut session = session();
            session
                .record_fallback_exchange("dark thoughts", "fallback reply", true)
                .unwrap();

            assert_eq!(session.crisis_flags(), &["crisis_detected".to_string()]);
            assert!(session.exchanges()[0].crisis_detected);
        }
    }
}
