//! AI Provider Adapters.
//!
//! Implementations of the AiProvider port.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google Gemini models via generateContent
//! - `MockAiProvider` - Scripted mock for testing and keyless runs

mod gemini_provider;
mod mock_provider;

pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use mock_provider::{MockAiProvider, MockError};
