//! Maya Therapy - Interactive AI Therapy Session Orchestrator
//!
//! This crate drives phase-based therapy conversations with an external
//! language model and derives structured clinical artifacts (assessments,
//! treatment plans, recommendations, diagnoses) from the dialogue.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
