//! Treatment goal repository port.

use crate::domain::foundation::{DomainError, GoalId, PatientId, SessionId};
use crate::domain::treatment::{GoalCategory, TreatmentGoal};
use async_trait::async_trait;

/// Repository port for treatment goals.
#[async_trait]
pub trait GoalRepository: Send + Sync {
    /// Create an active goal with a 90-day target, returning the
    /// persisted record with its assigned ID.
    async fn create(
        &self,
        patient_id: PatientId,
        session_id: Option<SessionId>,
        category: GoalCategory,
        description: &str,
    ) -> Result<TreatmentGoal, DomainError>;

    /// Persist the current state of an existing goal.
    ///
    /// # Errors
    ///
    /// - `GoalNotFound` if the goal doesn't exist
    async fn update(&self, goal: &TreatmentGoal) -> Result<(), DomainError>;

    /// Find a goal by ID. Returns `None` if not found.
    async fn find_by_id(&self, id: GoalId) -> Result<Option<TreatmentGoal>, DomainError>;

    /// Active goals for a patient, newest first.
    async fn find_active_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<TreatmentGoal>, DomainError>;

    /// Goals created during a specific session.
    async fn find_by_session(&self, session_id: SessionId)
        -> Result<Vec<TreatmentGoal>, DomainError>;
}
