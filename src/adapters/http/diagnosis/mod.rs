//! Diagnosis documentation HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::DiagnosisHandlers;
pub use routes::diagnosis_routes;
