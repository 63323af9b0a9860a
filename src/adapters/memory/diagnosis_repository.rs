//! In-memory diagnosis documentation repository.

use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use crate::domain::diagnosis::{AutoDiagnosis, DiagnosisRecord, NewDiagnosis};
use crate::domain::foundation::{DiagnosisId, DomainError, ErrorCode, PatientId, SessionId};
use crate::ports::DiagnosisRepository;

/// Mutex-guarded diagnosis store.
#[derive(Default)]
pub struct InMemoryDiagnosisRepository {
    records: Mutex<Vec<DiagnosisRecord>>,
    next_id: AtomicI64,
}

impl InMemoryDiagnosisRepository {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn newest_first(&self, filter: impl Fn(&DiagnosisRecord) -> bool) -> Vec<DiagnosisRecord> {
        let records = self.records.lock().unwrap();
        let mut matching: Vec<DiagnosisRecord> =
            records.iter().filter(|r| filter(r)).cloned().collect();
        matching.sort_by(|a, b| {
            b.created_date
                .cmp(&a.created_date)
                .then(b.id.as_i64().cmp(&a.id.as_i64()))
        });
        matching
    }
}

#[async_trait]
impl DiagnosisRepository for InMemoryDiagnosisRepository {
    async fn create_manual(&self, new: &NewDiagnosis) -> Result<DiagnosisRecord, DomainError> {
        let id = DiagnosisId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = DiagnosisRecord::manual(id, new)
            .map_err(|e| DomainError::new(ErrorCode::ValidationFailed, e.to_string()))?;
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn create_automated(
        &self,
        patient_id: PatientId,
        session_id: SessionId,
        assessment: &AutoDiagnosis,
    ) -> Result<DiagnosisRecord, DomainError> {
        let id = DiagnosisId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = DiagnosisRecord::automated(id, patient_id, session_id, assessment);
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update(&self, record: &DiagnosisRecord) -> Result<(), DomainError> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::DiagnosisNotFound,
                "Diagnosis not found",
            )),
        }
    }

    async fn find_by_id(&self, id: DiagnosisId) -> Result<Option<DiagnosisRecord>, DomainError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<DiagnosisRecord>, DomainError> {
        Ok(self.newest_first(|r| r.patient_id == patient_id))
    }

    async fn find_by_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<DiagnosisRecord>, DomainError> {
        Ok(self.newest_first(|r| r.session_id == Some(session_id)))
    }
}
