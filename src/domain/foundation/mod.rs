//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the therapy domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{DiagnosisId, GoalId, HomeworkId, PatientId, SessionId};
pub use timestamp::Timestamp;
