//! HTTP DTOs for diagnosis documentation endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::diagnosis::{DiagnosisRecord, DiagnosisUpdate, NewDiagnosis, DEFAULT_CONFIDENCE};
use crate::domain::foundation::{PatientId, SessionId};

/// Request to create a clinician-entered diagnosis.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDiagnosisRequest {
    pub patient_id: i64,
    #[serde(default)]
    pub session_id: Option<i64>,
    pub diagnosis_name: String,
    #[serde(default)]
    pub diagnosis_code: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default = "default_confidence")]
    pub confidence_level: String,
    pub supporting_evidence: String,
    #[serde(default)]
    pub clinical_notes: Option<String>,
}

fn default_confidence() -> String {
    DEFAULT_CONFIDENCE.to_string()
}

impl From<CreateDiagnosisRequest> for NewDiagnosis {
    fn from(req: CreateDiagnosisRequest) -> Self {
        Self {
            patient_id: PatientId::new(req.patient_id),
            session_id: req.session_id.map(SessionId::new),
            diagnosis_name: req.diagnosis_name,
            diagnosis_code: req.diagnosis_code,
            severity: req.severity,
            confidence_level: req.confidence_level,
            supporting_evidence: req.supporting_evidence,
            clinical_notes: req.clinical_notes,
        }
    }
}

/// Partial update to an existing diagnosis.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDiagnosisRequest {
    #[serde(default)]
    pub diagnosis_code: Option<String>,
    #[serde(default)]
    pub diagnosis_name: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub confidence_level: Option<String>,
    #[serde(default)]
    pub supporting_evidence: Option<String>,
    #[serde(default)]
    pub clinical_notes: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<UpdateDiagnosisRequest> for DiagnosisUpdate {
    fn from(req: UpdateDiagnosisRequest) -> Self {
        Self {
            diagnosis_code: req.diagnosis_code,
            diagnosis_name: req.diagnosis_name,
            severity: req.severity,
            confidence_level: req.confidence_level,
            supporting_evidence: req.supporting_evidence,
            clinical_notes: req.clinical_notes,
            status: req.status,
        }
    }
}

/// Diagnosis view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisResponse {
    pub id: i64,
    pub patient_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis_code: Option<String>,
    pub diagnosis_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    pub confidence_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supporting_evidence: Option<String>,
    pub differential_diagnoses: Vec<String>,
    pub ruling_out: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinical_notes: Option<String>,
    pub diagnostic_criteria: serde_json::Value,
    pub diagnosed_by: String,
    pub status: String,
    pub created_date: String,
    pub updated_date: String,
}

impl From<DiagnosisRecord> for DiagnosisResponse {
    fn from(record: DiagnosisRecord) -> Self {
        Self {
            id: record.id.as_i64(),
            patient_id: record.patient_id.as_i64(),
            session_id: record.session_id.map(|id| id.as_i64()),
            diagnosis_code: record.diagnosis_code,
            diagnosis_name: record.diagnosis_name,
            severity: record.severity,
            confidence_level: record.confidence_level,
            supporting_evidence: record.supporting_evidence,
            differential_diagnoses: record.differential_diagnoses,
            ruling_out: record.ruling_out,
            clinical_notes: record.clinical_notes,
            diagnostic_criteria: record.diagnostic_criteria,
            diagnosed_by: record.diagnosed_by,
            status: record.status,
            created_date: record.created_date.to_rfc3339(),
            updated_date: record.updated_date.to_rfc3339(),
        }
    }
}

/// Response for automated diagnosis generation.
#[derive(Debug, Clone, Serialize)]
pub struct AutoDiagnosisResponse {
    pub diagnosis_id: i64,
    pub session_id: i64,
    pub auto_generated: bool,
    pub diagnosis_data: DiagnosisResponse,
    pub generated_at: String,
}
