//! AnalyticsHandler - System-wide usage statistics.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::AnalyticsReader;

/// System analytics with derived rates.
#[derive(Debug, Clone)]
pub struct AnalyticsSummary {
    pub total_patients: u64,
    pub total_sessions: u64,
    pub completed_sessions: u64,
    pub total_diagnoses: u64,

    /// Percentage of sessions that ran to completion, two decimals.
    pub completion_rate: f64,

    /// Mean exchange count over non-empty sessions, one decimal.
    pub average_session_exchanges: f64,

    /// Top five symptom tags with counts, most common first.
    pub common_symptoms: Vec<(String, u64)>,

    /// Top five diagnosis names with counts, most common first.
    pub diagnosis_distribution: Vec<(String, u64)>,

    pub generated_at: Timestamp,
}

/// Handler deriving the analytics summary from raw counters.
pub struct AnalyticsHandler {
    reader: Arc<dyn AnalyticsReader>,
}

impl AnalyticsHandler {
    pub fn new(reader: Arc<dyn AnalyticsReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self) -> Result<AnalyticsSummary, DomainError> {
        let snapshot = self.reader.snapshot().await?;

        let completion_rate = if snapshot.total_sessions > 0 {
            let rate =
                snapshot.completed_sessions as f64 / snapshot.total_sessions as f64 * 100.0;
            (rate * 100.0).round() / 100.0
        } else {
            0.0
        };

        let average_session_exchanges = snapshot
            .average_session_exchanges
            .map(|avg| (avg * 10.0).round() / 10.0)
            .unwrap_or(0.0);

        let mut common_symptoms = snapshot.symptom_counts;
        common_symptoms.truncate(5);
        let mut diagnosis_distribution = snapshot.diagnosis_counts;
        diagnosis_distribution.truncate(5);

        Ok(AnalyticsSummary {
            total_patients: snapshot.total_patients,
            total_sessions: snapshot.total_sessions,
            completed_sessions: snapshot.completed_sessions,
            total_diagnoses: snapshot.total_diagnoses,
            completion_rate,
            average_session_exchanges,
            common_symptoms,
            diagnosis_distribution,
            generated_at: Timestamp::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::AnalyticsSnapshot;
    use async_trait::async_trait;

    struct FixedReader(AnalyticsSnapshot);

    #[async_trait]
    impl AnalyticsReader for FixedReader {
        async fn snapshot(&self) -> Result<AnalyticsSnapshot, DomainError> {
            Ok(self.0.clone())
        }
    }

    fn counts(names: &[(&str, u64)]) -> Vec<(String, u64)> {
        names.iter().map(|(n, c)| (n.to_string(), *c)).collect()
    }

    #[tokio::test]
    async fn derives_rounded_rates_and_truncates_rankings() {
        let handler = AnalyticsHandler::new(Arc::new(FixedReader(AnalyticsSnapshot {
            total_patients: 10,
            total_sessions: 3,
            completed_sessions: 1,
            total_diagnoses: 4,
            average_session_exchanges: Some(7.24),
            symptom_counts: counts(&[
                ("anxiety", 9),
                ("depression", 7),
                ("insomnia", 4),
                ("fatigue", 3),
                ("anger", 2),
                ("stress", 1),
            ]),
            diagnosis_counts: counts(&[("GAD", 3), ("MDD", 1)]),
        })));

        let summary = handler.handle().await.unwrap();

        assert_eq!(summary.completion_rate, 33.33);
        assert_eq!(summary.average_session_exchanges, 7.2);
        assert_eq!(summary.common_symptoms.len(), 5);
        assert_eq!(summary.common_symptoms[0], ("anxiety".to_string(), 9));
        assert!(!summary
            .common_symptoms
            .iter()
            .any(|(name, _)| name == "stress"));
        assert_eq!(summary.diagnosis_distribution.len(), 2);
    }

    #[tokio::test]
    async fn empty_system_reports_zero_rates() {
        let handler =
            AnalyticsHandler::new(Arc::new(FixedReader(AnalyticsSnapshot::default())));

        let summary = handler.handle().await.unwrap();

        assert_eq!(summary.completion_rate, 0.0);
        assert_eq!(summary.average_session_exchanges, 0.0);
        assert!(summary.common_symptoms.is_empty());
    }
}
