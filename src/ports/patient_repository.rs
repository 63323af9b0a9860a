//! Patient repository port.

use crate::domain::foundation::{DomainError, PatientId};
use crate::domain::patient::Patient;
use async_trait::async_trait;

/// Repository port for patient records.
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Register a new patient, returning the persisted record with its
    /// assigned ID.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, name: &str) -> Result<Patient, DomainError>;

    /// Find a patient by ID. Returns `None` if not found.
    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>, DomainError>;

    /// List all patients, newest first.
    async fn list_all(&self) -> Result<Vec<Patient>, DomainError>;
}
