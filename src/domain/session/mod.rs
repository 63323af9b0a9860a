//! Therapy session domain module.
//!
//! A session is the conversation container: its phase state machine,
//! exchange history, accumulated symptoms, and attached clinical
//! artifacts (assessment report, treatment plan, recommendations).

mod aggregate;
mod exchange;
mod phase;

pub use aggregate::{PhaseTransition, TherapySession};
pub use exchange::{Exchange, InsightRecord};
pub use phase::SessionPhase;
