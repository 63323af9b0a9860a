//! Recommendation engine domain types.
//!
//! Covers session analysis, content and lifestyle recommendation items,
//! their deterministic fallbacks, and the assembled bundle stored on a
//! session.

mod analysis;
mod bundle;
mod content;
mod lifestyle;

pub use analysis::SessionAnalysis;
pub use bundle::{RecommendationBundle, RecommendationMetadata};
pub use content::ContentRecommendation;
pub use lifestyle::LifestyleRecommendation;

/// Extracts the outermost JSON array from free-form model text: the
/// span from the first `[` to the last `]`.
pub fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
