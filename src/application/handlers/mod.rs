//! Application handlers.
//!
//! Command handlers that orchestrate domain operations across the
//! repositories and the AI provider.

pub mod advance_session;
pub mod analytics;
pub mod assessment_runner;
pub mod auto_diagnosis;
pub mod recommendation_engine;
pub mod session_insights;
pub mod start_session;
pub mod transcript;
pub mod treatment_planner;

pub use advance_session::{
    AdvanceSessionCommand, AdvanceSessionHandler, AdvanceSessionResult, CRISIS_ALERT,
    FALLBACK_REPLY,
};
pub use analytics::{AnalyticsHandler, AnalyticsSummary};
pub use assessment_runner::AssessmentRunner;
pub use auto_diagnosis::{AutoDiagnosisCommand, AutoDiagnosisHandler};
pub use recommendation_engine::{
    GenerateRecommendationsCommand, GenerateRecommendationsHandler, GenerateRecommendationsResult,
    RecommendationEngine, DEFAULT_CONTENT_COUNT, DEFAULT_LIFESTYLE_COUNT,
};
pub use session_insights::{
    SessionInsightsCommand, SessionInsightsHandler, SessionInsightsResult, SessionStats,
};
pub use start_session::{StartSessionCommand, StartSessionHandler, StartSessionResult};
pub use transcript::format_transcript;
pub use treatment_planner::TreatmentPlanner;
