//! Diagnosis documentation records.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DiagnosisId, PatientId, SessionId, Timestamp, ValidationError};

/// Author tag for clinician-entered diagnoses.
pub const DIAGNOSED_BY_MANUAL: &str = "AI_System";

/// Author tag for diagnoses generated from a session transcript.
pub const DIAGNOSED_BY_AUTO: &str = "AI_System_Auto";

/// Default confidence assigned when none is supplied.
pub const DEFAULT_CONFIDENCE: &str = "preliminary";

/// A diagnosis documentation entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisRecord {
    pub id: DiagnosisId,
    pub patient_id: PatientId,
    pub session_id: Option<SessionId>,
    pub diagnosis_code: Option<String>,
    pub diagnosis_name: String,
    pub severity: Option<String>,
    pub confidence_level: String,
    pub supporting_evidence: Option<String>,
    pub differential_diagnoses: Vec<String>,
    pub ruling_out: Vec<String>,
    pub clinical_notes: Option<String>,

    /// Free-form criteria blob. Automated diagnoses store the model's
    /// treatment recommendations here.
    pub diagnostic_criteria: serde_json::Value,

    pub diagnosed_by: String,
    pub status: String,
    pub created_date: Timestamp,
    pub updated_date: Timestamp,
}

/// Fields for a clinician-entered diagnosis, before an ID is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDiagnosis {
    pub patient_id: PatientId,
    pub session_id: Option<SessionId>,
    pub diagnosis_name: String,
    pub diagnosis_code: Option<String>,
    pub severity: Option<String>,
    pub confidence_level: String,
    pub supporting_evidence: String,
    pub clinical_notes: Option<String>,
}

impl NewDiagnosis {
    /// Validates the draft.
    ///
    /// # Errors
    ///
    /// Returns an error when the diagnosis name is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.diagnosis_name.trim().is_empty() {
            return Err(ValidationError::empty_field("diagnosis_name"));
        }
        Ok(())
    }
}

impl DiagnosisRecord {
    /// Creates a clinician-entered diagnosis from a validated draft.
    pub fn manual(id: DiagnosisId, new: &NewDiagnosis) -> Result<Self, ValidationError> {
        new.validate()?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            patient_id: new.patient_id,
            session_id: new.session_id,
            diagnosis_code: new.diagnosis_code.clone(),
            diagnosis_name: new.diagnosis_name.clone(),
            severity: new.severity.clone(),
            confidence_level: new.confidence_level.clone(),
            supporting_evidence: Some(new.supporting_evidence.clone()),
            differential_diagnoses: Vec::new(),
            ruling_out: Vec::new(),
            clinical_notes: new.clinical_notes.clone(),
            diagnostic_criteria: serde_json::Value::Object(Default::default()),
            diagnosed_by: DIAGNOSED_BY_MANUAL.to_string(),
            status: "active".to_string(),
            created_date: now,
            updated_date: now,
        })
    }

    /// Creates a record from an automated diagnostic assessment.
    pub fn automated(
        id: DiagnosisId,
        patient_id: PatientId,
        session_id: SessionId,
        assessment: &AutoDiagnosis,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            patient_id,
            session_id: Some(session_id),
            diagnosis_code: assessment.diagnosis_code.clone(),
            diagnosis_name: assessment.primary_diagnosis.clone(),
            severity: assessment.severity.clone(),
            confidence_level: assessment.confidence_level.clone(),
            supporting_evidence: assessment.supporting_evidence.clone(),
            differential_diagnoses: assessment.differential_diagnoses.clone(),
            ruling_out: assessment.ruling_out.clone(),
            clinical_notes: assessment.clinical_notes.clone(),
            diagnostic_criteria: assessment.recommendations.clone(),
            diagnosed_by: DIAGNOSED_BY_AUTO.to_string(),
            status: "active".to_string(),
            created_date: now,
            updated_date: now,
        }
    }

    /// Applies a partial update, refreshing the update timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error when the update carries no fields.
    pub fn apply_update(&mut self, update: &DiagnosisUpdate) -> Result<(), ValidationError> {
        if update.is_empty() {
            return Err(ValidationError::invalid_format(
                "update",
                "no valid fields provided",
            ));
        }

        if let Some(code) = &update.diagnosis_code {
            self.diagnosis_code = Some(code.clone());
        }
        if let Some(name) = &update.diagnosis_name {
            self.diagnosis_name = name.clone();
        }
        if let Some(severity) = &update.severity {
            self.severity = Some(severity.clone());
        }
        if let Some(confidence) = &update.confidence_level {
            self.confidence_level = confidence.clone();
        }
        if let Some(evidence) = &update.supporting_evidence {
            self.supporting_evidence = Some(evidence.clone());
        }
        if let Some(notes) = &update.clinical_notes {
            self.clinical_notes = Some(notes.clone());
        }
        if let Some(status) = &update.status {
            self.status = status.clone();
        }

        self.updated_date = Timestamp::now();
        Ok(())
    }
}

/// A structured diagnostic assessment parsed from model output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoDiagnosis {
    #[serde(default)]
    pub primary_diagnosis: String,
    #[serde(default)]
    pub diagnosis_code: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default = "default_confidence")]
    pub confidence_level: String,
    #[serde(default)]
    pub supporting_evidence: Option<String>,
    #[serde(default)]
    pub differential_diagnoses: Vec<String>,
    #[serde(default)]
    pub ruling_out: Vec<String>,
    #[serde(default)]
    pub clinical_notes: Option<String>,
    #[serde(default)]
    pub recommendations: serde_json::Value,
}

fn default_confidence() -> String {
    DEFAULT_CONFIDENCE.to_string()
}

/// Partial update for a diagnosis record. Only the listed fields are
/// updatable; anything else in the request body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DiagnosisUpdate {
    pub diagnosis_code: Option<String>,
    pub diagnosis_name: Option<String>,
    pub severity: Option<String>,
    pub confidence_level: Option<String>,
    pub supporting_evidence: Option<String>,
    pub clinical_notes: Option<String>,
    pub status: Option<String>,
}

impl DiagnosisUpdate {
    pub fn is_empty(&self) -> bool {
        self.diagnosis_code.is_none()
            && self.diagnosis_name.is_none()
            && self.severity.is_none()
            && self.confidence_level.is_none()
            && self.supporting_evidence.is_none()
            && self.clinical_notes.is_none()
            && self.status.is_none()
    }
}

/// Extracts the outermost JSON object from free-form model text: the
/// span from the first `{` to the last `}`.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
