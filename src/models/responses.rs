use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::votes::VoteOutcome;
use crate::models::domain::{Post, RankedProfile, ScoreBreakdown};

/// Response for the score endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreProfileResponse {
    pub user_id: String,
    pub score: f64,
    pub level: u8,
    pub breakdown: ScoreBreakdown,
}

/// Response for the profile ranking endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankProfilesResponse {
    pub view_id: Uuid,
    pub results: Vec<RankedProfile>,
    pub total_candidates: usize,
    pub total_results: usize,
}

/// Response for the post ranking endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankPostsResponse {
    pub results: Vec<Post>,
    pub total_candidates: usize,
    pub total_results: usize,
}

/// Response for the vote endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VotePostResponse {
    pub post: Post,
    pub outcome: VoteOutcome,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
