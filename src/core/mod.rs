// Core algorithm exports
pub mod age;
pub mod distance;
pub mod filters;
pub mod pipeline;
pub mod scoring;
pub mod votes;

pub use age::{age_on, derive_age, parse_birth_date};
pub use distance::{distance_from, haversine_distance_km};
pub use filters::{matches_filter, matches_post_filter};
pub use pipeline::{Pipeline, PipelineResult, RankOptions};
pub use scoring::{derive_level, ScoreEngine};
pub use votes::{Vote, VoteOutcome};
