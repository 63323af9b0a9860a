//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Language model providers (Gemini, mock)
//! - `http` - Axum HTTP and WebSocket surface
//! - `memory` - In-memory repositories for tests
//! - `postgres` - SQLx-backed repositories and readers

pub mod ai;
pub mod http;
pub mod memory;
pub mod postgres;
