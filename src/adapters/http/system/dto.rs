//! HTTP DTOs for system endpoints.

use serde::Serialize;

use crate::application::handlers::AnalyticsSummary;

/// Health probe response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub version: &'static str,
    pub features: Vec<&'static str>,
}

/// System analytics response.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsResponse {
    pub total_patients: u64,
    pub total_sessions: u64,
    pub completed_sessions: u64,
    pub total_diagnoses: u64,
    pub completion_rate: f64,
    pub average_session_exchanges: f64,
    pub common_symptoms: serde_json::Map<String, serde_json::Value>,
    pub diagnosis_distribution: serde_json::Map<String, serde_json::Value>,
    pub system_uptime: String,
}

fn count_map(counts: Vec<(String, u64)>) -> serde_json::Map<String, serde_json::Value> {
    counts
        .into_iter()
        .map(|(name, count)| (name, serde_json::Value::from(count)))
        .collect()
}

impl From<AnalyticsSummary> for AnalyticsResponse {
    fn from(summary: AnalyticsSummary) -> Self {
        Self {
            total_patients: summary.total_patients,
            total_sessions: summary.total_sessions,
            completed_sessions: summary.completed_sessions,
            total_diagnoses: summary.total_diagnoses,
            completion_rate: summary.completion_rate,
            average_session_exchanges: summary.average_session_exchanges,
            common_symptoms: count_map(summary.common_symptoms),
            diagnosis_distribution: count_map(summary.diagnosis_distribution),
            system_uptime: summary.generated_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    #[test]
    fn analytics_response_builds_count_maps() {
        let summary = AnalyticsSummary {
            total_patients: 2,
            total_sessions: 3,
            completed_sessions: 1,
            total_diagnoses: 0,
            completion_rate: 33.33,
            average_session_exchanges: 4.5,
            common_symptoms: vec![("anxiety".to_string(), 2)],
            diagnosis_distribution: vec![],
            generated_at: Timestamp::now(),
        };

        let response: AnalyticsResponse = summary.into();
        assert_eq!(response.common_symptoms["anxiety"], 2);
        assert!(response.diagnosis_distribution.is_empty());
    }
}
