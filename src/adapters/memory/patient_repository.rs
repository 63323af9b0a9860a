//! In-memory patient repository.

use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, PatientId};
use crate::domain::patient::Patient;
use crate::ports::PatientRepository;

/// Mutex-guarded patient store.
#[derive(Default)]
pub struct InMemoryPatientRepository {
    patients: Mutex<Vec<Patient>>,
    next_id: AtomicI64,
}

impl InMemoryPatientRepository {
    pub fn new() -> Self {
        Self {
            patients: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl PatientRepository for InMemoryPatientRepository {
    async fn create(&self, name: &str) -> Result<Patient, DomainError> {
        let id = PatientId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let patient = Patient::new(id, name)
            .map_err(|e| DomainError::new(ErrorCode::ValidationFailed, e.to_string()))?;
        self.patients.lock().unwrap().push(patient.clone());
        Ok(patient)
    }

    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>, DomainError> {
        Ok(self
            .patients
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Patient>, DomainError> {
        let patients = self.patients.lock().unwrap();
        Ok(patients.iter().rev().cloned().collect())
    }
}
