//! Therapy session HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;
pub mod ws;

pub use handlers::SessionHandlers;
pub use routes::{chat_ws_routes, session_routes};
pub use ws::ChatSocketState;
