//! Therapy session repository port.
//!
//! Defines the contract for persisting and retrieving the session
//! aggregate. Implementations store the conversation history, insight
//! log, and attached clinical artifacts alongside the phase state.

use crate::domain::foundation::{DomainError, PatientId, SessionId};
use crate::domain::session::TherapySession;
use async_trait::async_trait;

/// Repository port for the therapy session aggregate.
#[async_trait]
pub trait TherapySessionRepository: Send + Sync {
    /// Create a fresh intake-phase session for a patient, returning the
    /// persisted aggregate with its assigned ID.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, patient_id: PatientId) -> Result<TherapySession, DomainError>;

    /// Persist the current state of an existing session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &TherapySession) -> Result<(), DomainError>;

    /// Find a session by ID. Returns `None` if not found.
    async fn find_by_id(&self, id: SessionId) -> Result<Option<TherapySession>, DomainError>;

    /// All sessions for a patient, newest first.
    async fn find_by_patient(&self, patient_id: PatientId)
        -> Result<Vec<TherapySession>, DomainError>;

    /// The most recent sessions for a patient, newest first.
    async fn find_recent_by_patient(
        &self,
        patient_id: PatientId,
        limit: u32,
    ) -> Result<Vec<TherapySession>, DomainError>;
}
