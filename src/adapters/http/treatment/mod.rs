//! Treatment goal and homework HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::TreatmentHandlers;
pub use routes::treatment_routes;
