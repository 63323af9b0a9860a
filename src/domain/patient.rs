//! Patient records.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PatientId, Timestamp, ValidationError};

/// Default therapy modality assigned at registration.
pub const DEFAULT_THERAPY_MODE: &str = "CBT";

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Unique identifier for this patient.
    pub id: PatientId,

    /// Patient display name.
    pub name: String,

    /// When the patient registered.
    pub created_date: Timestamp,

    /// Preferred therapy modality; defaults to CBT.
    pub preferred_therapy_mode: String,

    /// Symptom tags recorded against the patient record itself.
    /// Per-session symptom tracking lives on the session aggregate.
    pub detected_symptoms: Vec<String>,

    /// Free-form clinical notes.
    pub session_notes: Vec<String>,
}

impl Patient {
    /// Creates a new patient with the default therapy mode.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty or whitespace.
    pub fn new(id: PatientId, name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        Ok(Self {
            id,
            name,
            created_date: Timestamp::now(),
            preferred_therapy_mode: DEFAULT_THERAPY_MODE.to_string(),
            detected_symptoms: Vec::new(),
            session_notes: Vec::new(),
        })
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_patient_gets_cbt_by_default() {
        let patient = Patient::new(PatientId::new(1), "Alex").unwrap();
        assert_eq!(patient.preferred_therapy_mode, "CBT");
        assert!(patient.detected_symptoms.is_empty());
    }

    #[test]
    fn rejects_blank_name() {
        assert!(Patient::new(PatientId::new(1), "   ").is_err());
        assert!(Patient::new(PatientId::new(1), "").is_err());
    }

}
