//! System HTTP adapter (health and analytics).

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::SystemHandlers;
pub use routes::system_routes;
