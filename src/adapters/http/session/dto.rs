//! HTTP DTOs for therapy session endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::treatment::dto::{GoalResponse, HomeworkResponse};
use crate::application::handlers::{SessionInsightsResult, StartSessionResult};
use crate::domain::assessment::AssessmentReport;
use crate::domain::recommendation::RecommendationBundle;
use crate::domain::session::{Exchange, InsightRecord, SessionPhase, TherapySession};
use crate::domain::treatment::TreatmentPlan;

/// Request to start a new interactive session.
#[derive(Debug, Clone, Deserialize)]
pub struct StartSessionRequest {
    pub patient_id: i64,
}

/// Response for a started session.
#[derive(Debug, Clone, Serialize)]
pub struct StartSessionResponse {
    pub session_id: i64,
    pub patient_name: String,
    pub initial_message: String,
    pub phase: SessionPhase,
}

impl From<StartSessionResult> for StartSessionResponse {
    fn from(result: StartSessionResult) -> Self {
        Self {
            session_id: result.session_id.as_i64(),
            patient_name: result.patient_name,
            initial_message: result.initial_message,
            phase: result.phase,
        }
    }
}

/// Request to continue the conversation in a session.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub session_id: i64,
    pub message: String,
}

/// Response for a conversation turn.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub phase: SessionPhase,
    pub phase_changed: bool,
    pub conversation_count: u32,
    pub detected_symptoms: Vec<String>,
    pub session_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crisis_alert: Option<String>,
}

/// Compact session view for list responses.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummaryResponse {
    pub id: i64,
    pub patient_id: i64,
    pub patient_name: String,
    pub current_phase: SessionPhase,
    pub total_exchanges: u32,
    pub detected_symptoms: Vec<String>,
    pub session_completed: bool,
    pub session_date: String,
}

impl SessionSummaryResponse {
    pub fn from_session(session: &TherapySession, patient_name: &str) -> Self {
        Self {
            id: session.id().as_i64(),
            patient_id: session.patient_id().as_i64(),
            patient_name: patient_name.to_string(),
            current_phase: session.phase(),
            total_exchanges: session.exchange_count(),
            detected_symptoms: session.detected_symptoms().to_vec(),
            session_completed: session.is_completed(),
            session_date: session.session_date().to_rfc3339(),
        }
    }
}

/// Full session view including history, reports, and linked records.
#[derive(Debug, Clone, Serialize)]
pub struct SessionDetailResponse {
    pub id: i64,
    pub patient_id: i64,
    pub patient_name: String,
    pub current_phase: SessionPhase,
    pub conversation_history: Vec<Exchange>,
    pub detected_symptoms: Vec<String>,
    pub session_insights: Vec<InsightRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_results: Option<AssessmentReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_goals: Option<TreatmentPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation_data: Option<RecommendationBundle>,
    pub crisis_flags: Vec<String>,
    pub total_exchanges: u32,
    pub session_completed: bool,
    pub session_date: String,
    pub goals: Vec<GoalResponse>,
    pub homework: Vec<HomeworkResponse>,
}

impl SessionDetailResponse {
    pub fn from_session(
        session: &TherapySession,
        patient_name: &str,
        goals: Vec<GoalResponse>,
        homework: Vec<HomeworkResponse>,
    ) -> Self {
        Self {
            id: session.id().as_i64(),
            patient_id: session.patient_id().as_i64(),
            patient_name: patient_name.to_string(),
            current_phase: session.phase(),
            conversation_history: session.exchanges().to_vec(),
            detected_symptoms: session.detected_symptoms().to_vec(),
            session_insights: session.insights().to_vec(),
            assessment_results: session.assessment_report().cloned(),
            generated_goals: session.treatment_plan().cloned(),
            recommendation_data: session.recommendations().cloned(),
            crisis_flags: session.crisis_flags().to_vec(),
            total_exchanges: session.exchange_count(),
            session_completed: session.is_completed(),
            session_date: session.session_date().to_rfc3339(),
            goals,
            homework,
        }
    }
}

/// Point-in-time session statistics for the insights response.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatsResponse {
    pub total_exchanges: u32,
    pub current_phase: SessionPhase,
    pub detected_symptoms: Vec<String>,
    pub session_completed: bool,
    pub session_date: String,
}

/// Response for the insights endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SessionInsightsResponse {
    pub session_id: i64,
    pub patient_name: String,
    pub session_stats: SessionStatsResponse,
    pub ai_insights: String,
    pub session_insights: Vec<InsightRecord>,
}

impl From<SessionInsightsResult> for SessionInsightsResponse {
    fn from(result: SessionInsightsResult) -> Self {
        Self {
            session_id: result.session_id.as_i64(),
            patient_name: result.patient_name,
            session_stats: SessionStatsResponse {
                total_exchanges: result.stats.total_exchanges,
                current_phase: result.stats.current_phase,
                detected_symptoms: result.stats.detected_symptoms,
                session_completed: result.stats.session_completed,
                session_date: result.stats.session_date.to_rfc3339(),
            },
            ai_insights: result.ai_insights,
            session_insights: result.insight_records,
        }
    }
}

/// Response for the transcript export endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ExportResponse {
    pub transcript: String,
    pub session_summary: SessionSummaryResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{PatientId, SessionId};

    #[test]
    fn chat_request_deserializes() {
        let json = r#"{"session_id": 3, "message": "I feel anxious"}"#;
        let req: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.session_id, 3);
        assert_eq!(req.message, "I feel anxious");
    }

    #[test]
    fn chat_response_omits_absent_crisis_alert() {
        let response = ChatResponse {
            response: "Tell me more".to_string(),
            phase: SessionPhase::Intake,
            phase_changed: false,
            conversation_count: 1,
            detected_symptoms: vec![],
            session_completed: false,
            crisis_alert: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("crisis_alert").is_none());
        assert_eq!(json["phase"], "intake");
    }

    #[test]
    fn session_detail_includes_history_and_links() {
        let mut session = TherapySession::new(SessionId::new(4), PatientId::new(1));
        session
            .record_exchange(
                "hello",
                "hi",
                crate::domain::detection::analyze_utterance("hello"),
                false,
            )
            .unwrap();

        let detail = SessionDetailResponse::from_session(&session, "Alex", vec![], vec![]);
        assert_eq!(detail.id, 4);
        assert_eq!(detail.conversation_history.len(), 1);
        assert!(detail.assessment_results.is_none());
        assert_eq!(detail.patient_name, "Alex");
    }
}
