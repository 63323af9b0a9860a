//! In-memory homework assignment repository.

use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, HomeworkId, PatientId, SessionId};
use crate::domain::treatment::HomeworkAssignment;
use crate::ports::HomeworkRepository;

/// Mutex-guarded homework store.
#[derive(Default)]
pub struct InMemoryHomeworkRepository {
    assignments: Mutex<Vec<HomeworkAssignment>>,
    next_id: AtomicI64,
}

impl InMemoryHomeworkRepository {
    pub fn new() -> Self {
        Self {
            assignments: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn newest_first(
        &self,
        filter: impl Fn(&HomeworkAssignment) -> bool,
    ) -> Vec<HomeworkAssignment> {
        let assignments = self.assignments.lock().unwrap();
        let mut matching: Vec<HomeworkAssignment> =
            assignments.iter().filter(|hw| filter(hw)).cloned().collect();
        matching.sort_by(|a, b| {
            b.assigned_date
                .cmp(&a.assigned_date)
                .then(b.id.as_i64().cmp(&a.id.as_i64()))
        });
        matching
    }
}

#[async_trait]
impl HomeworkRepository for InMemoryHomeworkRepository {
    async fn create(
        &self,
        patient_id: PatientId,
        session_id: SessionId,
        assignment_type: &str,
        description: &str,
    ) -> Result<HomeworkAssignment, DomainError> {
        let id = HomeworkId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let assignment =
            HomeworkAssignment::new(id, patient_id, session_id, assignment_type, description);
        self.assignments.lock().unwrap().push(assignment.clone());
        Ok(assignment)
    }

    async fn update(&self, assignment: &HomeworkAssignment) -> Result<(), DomainError> {
        let mut assignments = self.assignments.lock().unwrap();
        match assignments.iter_mut().find(|hw| hw.id == assignment.id) {
            Some(existing) => {
                *existing = assignment.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::HomeworkNotFound,
                "Homework not found",
            )),
        }
    }

    async fn find_by_id(
        &self,
        id: HomeworkId,
    ) -> Result<Option<HomeworkAssignment>, DomainError> {
        Ok(self
            .assignments
            .lock()
            .unwrap()
            .iter()
            .find(|hw| hw.id == id)
            .cloned())
    }

    async fn find_pending_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<HomeworkAssignment>, DomainError> {
        Ok(self.newest_first(|hw| hw.patient_id == patient_id && !hw.completed))
    }

    async fn find_recent_by_patient(
        &self,
        patient_id: PatientId,
        limit: u32,
    ) -> Result<Vec<HomeworkAssignment>, DomainError> {
        let mut matching = self.newest_first(|hw| hw.patient_id == patient_id);
        matching.truncate(limit as usize);
        Ok(matching)
    }

    async fn find_by_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<HomeworkAssignment>, DomainError> {
        Ok(self.newest_first(|hw| hw.session_id == session_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_returns_pending_assignment() {
        let repo = InMemoryHomeworkRepository::new();
        let hw = repo
            .create(
                PatientId::new(1),
                SessionId::new(1),
                "thought_record",
                "Record automatic thoughts daily",
            )
            .await
            .unwrap();

        assert_eq!(hw.id, HomeworkId::new(1));
        assert!(!hw.completed);
    }

    #[tokio::test]
    async fn completing_removes_from_pending() {
        let repo = InMemoryHomeworkRepository::new();
        let mut hw = repo
            .create(PatientId::new(1), SessionId::new(1), "journaling", "Journal nightly")
            .await
            .unwrap();

        hw.mark_completed();
        repo.update(&hw).await.unwrap();

        let pending = repo.find_pending_by_patient(PatientId::new(1)).await.unwrap();
        assert!(pending.is_empty());
    }

    #[tokio::test]
    async fn recent_includes_completed_and_respects_limit() {
        let repo = InMemoryHomeworkRepository::new();
        for i in 0..3 {
            let mut hw = repo
                .create(
                    PatientId::new(1),
                    SessionId::new(1),
                    "thought_record",
                    &format!("assignment {}", i),
                )
                .await
                .unwrap();
            if i == 0 {
                hw.mark_completed();
                repo.update(&hw).await.unwrap();
            }
        }

        let recent = repo
            .find_recent_by_patient(PatientId::new(1), 2)
            .await
            .unwrap();
        assert_eq!(recent.len(), 2);
        assert!(recent[0].id.as_i64() > recent[1].id.as_i64());
    }

    #[tokio::test]
    async fn update_fails_for_unknown_assignment() {
        let repo = InMemoryHomeworkRepository::new();
        let hw = HomeworkAssignment::new(
            HomeworkId::new(9),
            PatientId::new(1),
            SessionId::new(1),
            "thought_record",
            "missing",
        );
        let err = repo.update(&hw).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::HomeworkNotFound);
    }
}
