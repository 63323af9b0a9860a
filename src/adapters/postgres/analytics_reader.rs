//! PostgreSQL implementation of the analytics read port.
//!
//! Counts come straight from SQL aggregates; symptom tags are unpacked
//! from the JSONB column on the session rows.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::DomainError;
use crate::ports::{AnalyticsReader, AnalyticsSnapshot};

use super::{db_error, row_error};

#[derive(Clone)]
pub struct PostgresAnalyticsReader {
    pool: PgPool,
}

impl PostgresAnalyticsReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count(&self, query: &str, context: &str) -> Result<u64, DomainError> {
        let row = sqlx::query(query)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error(context, e))?;
        let n: i64 = row.try_get("n").map_err(row_error)?;
        Ok(n.max(0) as u64)
    }

    async fn ranked_counts(&self, query: &str, context: &str) -> Result<Vec<(String, u64)>, DomainError> {
        let rows = sqlx::query(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error(context, e))?;

        rows.into_iter()
            .map(|row| {
                let name: String = row.try_get("name").map_err(row_error)?;
                let n: i64 = row.try_get("n").map_err(row_error)?;
                Ok((name, n.max(0) as u64))
            })
            .collect()
    }
}

#[async_trait]
impl AnalyticsReader for PostgresAnalyticsReader {
    async fn snapshot(&self) -> Result<AnalyticsSnapshot, DomainError> {
        let total_patients = self
            .count("SELECT COUNT(*) AS n FROM patients", "Failed to count patients")
            .await?;
        let total_sessions = self
            .count(
                "SELECT COUNT(*) AS n FROM therapy_sessions",
                "Failed to count sessions",
            )
            .await?;
        let completed_sessions = self
            .count(
                "SELECT COUNT(*) AS n FROM therapy_sessions WHERE session_completed",
                "Failed to count completed sessions",
            )
            .await?;
        let total_diagnoses = self
            .count(
                "SELECT COUNT(*) AS n FROM diagnosis_documentation",
                "Failed to count diagnoses",
            )
            .await?;

        let row = sqlx::query(
            r#"
            SELECT AVG(total_exchanges)::float8 AS average
            FROM therapy_sessions
            WHERE total_exchanges > 0
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to average exchanges", e))?;
        let average_session_exchanges: Option<f64> = row.try_get("average").map_err(row_error)?;

        let symptom_counts = self
            .ranked_counts(
                r#"
                SELECT symptom AS name, COUNT(*) AS n
                FROM therapy_sessions,
                     jsonb_array_elements_text(detected_symptoms) AS symptom
                GROUP BY symptom
                ORDER BY n DESC, name ASC
                "#,
                "Failed to count symptoms",
            )
            .await?;

        let diagnosis_counts = self
            .ranked_counts(
                r#"
                SELECT diagnosis_name AS name, COUNT(*) AS n
                FROM diagnosis_documentation
                GROUP BY diagnosis_name
                ORDER BY n DESC, name ASC
                "#,
                "Failed to count diagnosis names",
            )
            .await?;

        Ok(AnalyticsSnapshot {
            total_patients,
            total_sessions,
            completed_sessions,
            total_diagnoses,
            average_session_exchanges,
            symptom_counts,
            diagnosis_counts,
        })
    }
}
