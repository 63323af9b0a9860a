//! PostgreSQL adapters - database implementations of the repository ports.
//!
//! Conversation history, insight records, reports, and plans are stored
//! as JSONB blobs on the session row, mirroring the aggregate shape.

mod analytics_reader;
mod diagnosis_repository;
mod goal_repository;
mod homework_repository;
mod patient_repository;
mod therapy_session_repository;

pub use analytics_reader::PostgresAnalyticsReader;
pub use diagnosis_repository::PostgresDiagnosisRepository;
pub use goal_repository::PostgresGoalRepository;
pub use homework_repository::PostgresHomeworkRepository;
pub use patient_repository::PostgresPatientRepository;
pub use therapy_session_repository::PostgresTherapySessionRepository;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Wraps a sqlx error with query context.
pub(crate) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

/// Wraps a column decode failure when mapping a fetched row.
pub(crate) fn row_error(e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to map row: {}", e))
}
