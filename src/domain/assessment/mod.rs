//! Standardized symptom assessment.
//!
//! Covers the PHQ-9 and GAD-7 instruments: item sets, severity bands,
//! digit-reply scoring, and the per-session report attached when a
//! session enters its assessment phase.

mod instrument;
mod report;

pub use instrument::{Instrument, MAX_ITEM_SCORE};
pub use report::{AssessmentReport, ScoreResult};
