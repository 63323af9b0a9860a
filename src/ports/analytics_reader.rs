//! Analytics reader port (read side).
//!
//! Cross-table aggregate counts for the system analytics endpoint.
//! Implementations may compute these in SQL or in memory; rates and
//! rounding are left to the caller.

use crate::domain::foundation::DomainError;
use async_trait::async_trait;

/// Raw system-wide counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsSnapshot {
    pub total_patients: u64,
    pub total_sessions: u64,
    pub completed_sessions: u64,
    pub total_diagnoses: u64,

    /// Mean exchange count over sessions with at least one exchange;
    /// `None` when no such session exists.
    pub average_session_exchanges: Option<f64>,

    /// Symptom tag counts across all sessions, most common first.
    pub symptom_counts: Vec<(String, u64)>,

    /// Diagnosis name counts, most common first.
    pub diagnosis_counts: Vec<(String, u64)>,
}

/// Read port for system analytics.
#[async_trait]
pub trait AnalyticsReader: Send + Sync {
    /// Collect the current system-wide counters.
    async fn snapshot(&self) -> Result<AnalyticsSnapshot, DomainError>;
}
