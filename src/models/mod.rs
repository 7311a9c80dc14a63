// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AgeRange, Comment, FilterConfig, Gender, GenderMultipliers, GeoPoint, IncomeBonus, IncomeLevel, Post,
    PostKind, Profile, ProfileScore, RankedProfile, RatingBucket, ScoreBreakdown, ScoringWeights, SortDirection,
    SortKey,
};
pub use requests::{RankPostsRequest, RankProfilesRequest, ScoreProfileRequest, VoteAction, VotePostRequest};
pub use responses::{
    ErrorResponse, HealthResponse, RankPostsResponse, RankProfilesResponse, ScoreProfileResponse, VotePostResponse,
};
