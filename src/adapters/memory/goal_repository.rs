//! In-memory treatment goal repository.

use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, GoalId, PatientId, SessionId};
use crate::domain::treatment::{GoalCategory, TreatmentGoal};
use crate::ports::GoalRepository;

/// Mutex-guarded goal store.
#[derive(Default)]
pub struct InMemoryGoalRepository {
    goals: Mutex<Vec<TreatmentGoal>>,
    next_id: AtomicI64,
}

impl InMemoryGoalRepository {
    pub fn new() -> Self {
        Self {
            goals: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl GoalRepository for InMemoryGoalRepository {
    async fn create(
        &self,
        patient_id: PatientId,
        session_id: Option<SessionId>,
        category: GoalCategory,
        description: &str,
    ) -> Result<TreatmentGoal, DomainError> {
        let id = GoalId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let goal = TreatmentGoal::new(id, patient_id, session_id, category, description);
        self.goals.lock().unwrap().push(goal.clone());
        Ok(goal)
    }

    async fn update(&self, goal: &TreatmentGoal) -> Result<(), DomainError> {
        let mut goals = self.goals.lock().unwrap();
        match goals.iter_mut().find(|g| g.id == goal.id) {
            Some(existing) => {
                *existing = goal.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::GoalNotFound, "Goal not found")),
        }
    }

    async fn find_by_id(&self, id: GoalId) -> Result<Option<TreatmentGoal>, DomainError> {
        Ok(self.goals.lock().unwrap().iter().find(|g| g.id == id).cloned())
    }

    async fn find_active_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<TreatmentGoal>, DomainError> {
        Ok(self
            .goals
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.patient_id == patient_id && g.is_active())
            .cloned()
            .collect())
    }

    async fn find_by_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<TreatmentGoal>, DomainError> {
        Ok(self
            .goals
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.session_id == Some(session_id))
            .cloned()
            .collect())
    }
}
