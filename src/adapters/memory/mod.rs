//! In-memory adapters.
//!
//! Mutex-guarded implementations of the repository ports, used by
//! handler tests and integration tests. Key allocation mimics database
//! sequences with an atomic counter per store.

mod diagnosis_repository;
mod goal_repository;
mod homework_repository;
mod patient_repository;
mod therapy_session_repository;

pub use diagnosis_repository::InMemoryDiagnosisRepository;
pub use goal_repository::InMemoryGoalRepository;
pub use homework_repository::InMemoryHomeworkRepository;
pub use patient_repository::InMemoryPatientRepository;
pub use therapy_session_repository::InMemoryTherapySessionRepository;
