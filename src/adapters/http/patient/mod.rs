//! Patient HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::PatientHandlers;
pub use routes::patient_routes;
