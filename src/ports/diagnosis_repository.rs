//! Diagnosis documentation repository port.

use crate::domain::diagnosis::{AutoDiagnosis, DiagnosisRecord, NewDiagnosis};
use crate::domain::foundation::{DiagnosisId, DomainError, PatientId, SessionId};
use async_trait::async_trait;

/// Repository port for diagnosis documentation.
#[async_trait]
pub trait DiagnosisRepository: Send + Sync {
    /// Create a clinician-entered diagnosis, returning the persisted
    /// record with its assigned ID.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the draft is invalid
    /// - `DatabaseError` on persistence failure
    async fn create_manual(&self, new: &NewDiagnosis) -> Result<DiagnosisRecord, DomainError>;

    /// Create a record from an automated diagnostic assessment.
    async fn create_automated(
        &self,
        patient_id: PatientId,
        session_id: SessionId,
        assessment: &AutoDiagnosis,
    ) -> Result<DiagnosisRecord, DomainError>;

    /// Persist the current state of an existing record.
    ///
    /// # Errors
    ///
    /// - `DiagnosisNotFound` if the record doesn't exist
    async fn update(&self, record: &DiagnosisRecord) -> Result<(), DomainError>;

    /// Find a record by ID. Returns `None` if not found.
    async fn find_by_id(&self, id: DiagnosisId) -> Result<Option<DiagnosisRecord>, DomainError>;

    /// All diagnoses for a patient, newest first.
    async fn find_by_patient(&self, patient_id: PatientId)
        -> Result<Vec<DiagnosisRecord>, DomainError>;

    /// Diagnoses documented against a specific session, newest first.
    async fn find_by_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<DiagnosisRecord>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnosis_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn DiagnosisRepository) {}
    }
}
