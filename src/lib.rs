//! Vibe Rank - profile scoring and feed ranking for the Vibe social app
//!
//! The library exposes two pure components: a composite score engine that
//! turns engagement metrics into a score and level, and a filter/sort pipeline
//! over profile and post snapshots. The binary wraps both in a stateless
//! HTTP service.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use self::core::{derive_level, Pipeline, RankOptions, ScoreEngine};
pub use error::ApiError;
pub use models::{FilterConfig, Post, Profile, RankedProfile, ScoringWeights};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let engine = ScoreEngine::default();
        let score = engine.compute_score(&Profile::new("someone"));
        assert_eq!(derive_level(score), 1);
    }
}
