//! Application layer - commands, handlers, and prompt templates.
//!
//! This layer orchestrates domain operations and coordinates between
//! the repositories and the AI provider port.

pub mod handlers;
pub mod prompts;

pub use handlers::{
    AdvanceSessionCommand, AdvanceSessionHandler, AdvanceSessionResult, AnalyticsHandler,
    AnalyticsSummary, AssessmentRunner, AutoDiagnosisCommand, AutoDiagnosisHandler,
    GenerateRecommendationsCommand, GenerateRecommendationsHandler, GenerateRecommendationsResult,
    RecommendationEngine, SessionInsightsCommand, SessionInsightsHandler, SessionInsightsResult,
    StartSessionCommand, StartSessionHandler, StartSessionResult, TreatmentPlanner,
};
