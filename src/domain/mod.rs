//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `patient` - Patient records
//! - `session` - Therapy session aggregate, phases, and exchanges
//! - `detection` - Lexical symptom, mood, and crisis detection
//! - `assessment` - PHQ-9 and GAD-7 instruments and scoring
//! - `treatment` - Treatment goals and homework assignments
//! - `diagnosis` - Diagnosis documentation records
//! - `recommendation` - Content and lifestyle recommendation types

pub mod assessment;
pub mod detection;
pub mod diagnosis;
pub mod foundation;
pub mod patient;
pub mod recommendation;
pub mod session;
pub mod treatment;
