//! Homework assignment repository port.

use crate::domain::foundation::{DomainError, HomeworkId, PatientId, SessionId};
use crate::domain::treatment::HomeworkAssignment;
use async_trait::async_trait;

/// Repository port for homework assignments.
#[async_trait]
pub trait HomeworkRepository: Send + Sync {
    /// Create a pending assignment due in one week, returning the
    /// persisted record with its assigned ID.
    async fn create(
        &self,
        patient_id: PatientId,
        session_id: SessionId,
        assignment_type: &str,
        description: &str,
    ) -> Result<HomeworkAssignment, DomainError>;

    /// Persist the current state of an existing assignment.
    ///
    /// # Errors
    ///
    /// - `HomeworkNotFound` if the assignment doesn't exist
    async fn update(&self, assignment: &HomeworkAssignment) -> Result<(), DomainError>;

    /// Find an assignment by ID. Returns `None` if not found.
    async fn find_by_id(&self, id: HomeworkId)
        -> Result<Option<HomeworkAssignment>, DomainError>;

    /// Pending (incomplete) assignments for a patient, newest first.
    async fn find_pending_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<HomeworkAssignment>, DomainError>;

    /// Most recently assigned homework for a patient, newest first.
    async fn find_recent_by_patient(
        &self,
        patient_id: PatientId,
        limit: u32,
    ) -> Result<Vec<HomeworkAssignment>, DomainError>;

    /// Assignments created during a specific session.
    async fn find_by_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<HomeworkAssignment>, DomainError>;
}
