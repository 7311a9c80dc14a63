use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{FilterConfig, GeoPoint, Post, Profile};

/// Request to score a single profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreProfileRequest {
    pub profile: Profile,
}

/// Request to filter and order a snapshot of profiles
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankProfilesRequest {
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub filter: FilterConfig,
    /// Viewer location, used only to report distances
    #[serde(default)]
    pub origin: Option<GeoPoint>,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub limit: Option<u32>,
}

/// Request to filter and order a snapshot of posts
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankPostsRequest {
    pub posts: Vec<Post>,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub limit: Option<u32>,
}

/// Request to apply a vote to a post
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VotePostRequest {
    pub post: Post,
    #[validate(length(min = 1))]
    #[serde(alias = "voter_id", rename = "voterId")]
    pub voter_id: String,
    pub vote: VoteAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteAction {
    Up,
    Down,
    None,
}
