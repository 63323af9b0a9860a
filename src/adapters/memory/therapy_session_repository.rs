//! In-memory therapy session repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, PatientId, SessionId};
use crate::domain::session::TherapySession;
use crate::ports::TherapySessionRepository;

/// Mutex-guarded session store.
#[derive(Default)]
pub struct InMemoryTherapySessionRepository {
    sessions: Mutex<HashMap<i64, TherapySession>>,
    next_id: AtomicI64,
}

impl InMemoryTherapySessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn sorted_for_patient(&self, patient_id: PatientId) -> Vec<TherapySession> {
        let sessions = self.sessions.lock().unwrap();
        let mut matching: Vec<TherapySession> = sessions
            .values()
            .filter(|s| s.patient_id() == patient_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.session_date()
                .cmp(&a.session_date())
                .then(b.id().as_i64().cmp(&a.id().as_i64()))
        });
        matching
    }
}

#[async_trait]
impl TherapySessionRepository for InMemoryTherapySessionRepository {
    async fn create(&self, patient_id: PatientId) -> Result<TherapySession, DomainError> {
        let id = SessionId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let session = TherapySession::new(id, patient_id);
        self.sessions
            .lock()
            .unwrap()
            .insert(id.as_i64(), session.clone());
        Ok(session)
    }

    async fn update(&self, session: &TherapySession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.lock().unwrap();
        let key = session.id().as_i64();
        if !sessions.contains_key(&key) {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                "Session not found",
            ));
        }
        sessions.insert(key, session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: SessionId) -> Result<Option<TherapySession>, DomainError> {
        Ok(self.sessions.lock().unwrap().get(&id.as_i64()).cloned())
    }

    async fn find_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<TherapySession>, DomainError> {
        Ok(self.sorted_for_patient(patient_id))
    }

    async fn find_recent_by_patient(
        &self,
        patient_id: PatientId,
        limit: u32,
    ) -> Result<Vec<TherapySession>, DomainError> {
        let mut sessions = self.sorted_for_patient(patient_id);
        sessions.truncate(limit as usize);
        Ok(sessions)
    }
}
