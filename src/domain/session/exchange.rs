//! Conversation exchanges and per-exchange insight records.

use serde::{Deserialize, Serialize};

use super::SessionPhase;
use crate::domain::detection::ConversationSignals;
use crate::domain::foundation::Timestamp;

/// One patient/therapist exchange in the conversation history.
///
/// The `phase` field records the phase the session was in when the
/// exchange happened, before any transition it triggered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    /// What the patient said.
    #[serde(rename = "user")]
    pub user_input: String,

    /// The therapist reply.
    #[serde(rename = "ai")]
    pub ai_response: String,

    /// When the exchange was recorded.
    pub timestamp: Timestamp,

    /// Phase the session was in at the time.
    pub phase: SessionPhase,

    /// Whether crisis language was detected in the patient input.
    #[serde(default)]
    pub crisis_detected: bool,
}

impl Exchange {
    /// Creates a new exchange recorded at the current moment.
    pub fn new(
        user_input: impl Into<String>,
        ai_response: impl Into<String>,
        phase: SessionPhase,
        crisis_detected: bool,
    ) -> Self {
        Self {
            user_input: user_input.into(),
            ai_response: ai_response.into(),
            timestamp: Timestamp::now(),
            phase,
            crisis_detected,
        }
    }
}

/// Lexical signals captured for a single exchange, with context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightRecord {
    /// When the signals were captured.
    pub timestamp: Timestamp,

    /// Phase the session was in at the time.
    pub phase: SessionPhase,

    /// The detected signals.
    pub insights: ConversationSignals,
}

impl InsightRecord {
    /// Creates an insight record for the current moment.
    pub fn new(phase: SessionPhase, insights: ConversationSignals) -> Self {
        Self {
            timestamp: Timestamp::now(),
            phase,
            insights,
        }
    }
}
