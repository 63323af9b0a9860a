//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## AI Ports
//!
//! - `AiProvider` - Language model completions for the therapist agent
//!
//! ## Repository Ports
//!
//! - `PatientRepository` - Patient records
//! - `TherapySessionRepository` - The session aggregate
//! - `GoalRepository` - Treatment goals
//! - `HomeworkRepository` - Homework assignments
//! - `DiagnosisRepository` - Diagnosis documentation
//!
//! ## Read Ports
//!
//! - `AnalyticsReader` - System-wide aggregate counters

mod ai_provider;
mod analytics_reader;
mod diagnosis_repository;
mod goal_repository;
mod homework_repository;
mod patient_repository;
mod therapy_session_repository;

pub use ai_provider::{AiError, AiProvider, CompletionRequest, CompletionResponse, ProviderInfo};
pub use analytics_reader::{AnalyticsReader, AnalyticsSnapshot};
pub use diagnosis_repository::DiagnosisRepository;
pub use goal_repository::GoalRepository;
pub use homework_repository::HomeworkRepository;
pub use patient_repository::PatientRepository;
pub use therapy_session_repository::TherapySessionRepository;
