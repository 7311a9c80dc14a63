use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::core::{Pipeline, RankOptions, Vote};
use crate::error::ApiError;
use crate::models::{
    HealthResponse, RankPostsRequest, RankPostsResponse, RankProfilesRequest, RankProfilesResponse,
    ScoreProfileRequest, ScoreProfileResponse, VoteAction, VotePostRequest, VotePostResponse,
};

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
    pub max_records: usize,
    pub default_limit: Option<usize>,
}

impl AppState {
    fn check_size(&self, count: usize) -> Result<(), ApiError> {
        if count > self.max_records {
            return Err(ApiError::TooManyRecords {
                count,
                max: self.max_records,
            });
        }
        Ok(())
    }

    fn limit(&self, requested: Option<u32>) -> Option<usize> {
        requested.map(|limit| limit as usize).or(self.default_limit)
    }
}

/// Configure all ranking routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/profiles/score", web::post().to(score_profile))
        .route("/profiles/rank", web::post().to(rank_profiles))
        .route("/posts/rank", web::post().to(rank_posts))
        .route("/posts/vote", web::post().to(vote_post));
}

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Score a single profile
///
/// POST /api/v1/profiles/score
async fn score_profile(
    state: web::Data<AppState>,
    req: web::Json<ScoreProfileRequest>,
) -> HttpResponse {
    let engine = state.pipeline.engine();
    let breakdown = engine.breakdown(&req.profile);
    let score = engine.score_profile(&req.profile);

    tracing::debug!("Scored profile {}: {:.3} (level {})", req.profile.user_id, score.score, score.level);

    HttpResponse::Ok().json(ScoreProfileResponse {
        user_id: req.profile.user_id.clone(),
        score: score.score,
        level: score.level,
        breakdown,
    })
}

/// Filter and order a profile snapshot
///
/// POST /api/v1/profiles/rank
///
/// Request body:
/// ```json
/// {
///   "profiles": [{ "userId": "string", ... }],
///   "filter": { "city": "Kolkata", "ageRange": { "start": 18, "end": 30 }, "sortKey": "rating" },
///   "origin": { "latitude": 22.57, "longitude": 88.36 },
///   "limit": 20
/// }
/// ```
async fn rank_profiles(
    state: web::Data<AppState>,
    req: web::Json<RankProfilesRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    state.check_size(req.profiles.len())?;

    let options = RankOptions {
        origin: req.origin,
        limit: state.limit(req.limit),
        ..RankOptions::today()
    };
    let result = state.pipeline.rank_profiles(&req.profiles, &req.filter, &options);

    let response = RankProfilesResponse {
        view_id: uuid::Uuid::new_v4(),
        total_candidates: result.total_candidates,
        total_results: result.records.len(),
        results: result.records,
    };

    tracing::info!(
        "Returning {} profiles (from {} candidates), view {}",
        response.total_results,
        response.total_candidates,
        response.view_id
    );

    Ok(HttpResponse::Ok().json(response))
}

/// Filter and order a post snapshot
///
/// POST /api/v1/posts/rank
async fn rank_posts(
    state: web::Data<AppState>,
    req: web::Json<RankPostsRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    state.check_size(req.posts.len())?;

    let result = state
        .pipeline
        .rank_posts(&req.posts, &req.filter, state.limit(req.limit));

    tracing::info!("Returning {} posts (from {} candidates)", result.records.len(), result.total_candidates);

    Ok(HttpResponse::Ok().json(RankPostsResponse {
        total_candidates: result.total_candidates,
        total_results: result.records.len(),
        results: result.records,
    }))
}

/// Apply a vote to a post snapshot and return the updated post
///
/// POST /api/v1/posts/vote
///
/// Request body:
/// ```json
/// {
///   "post": { "postId": "string", ... },
///   "voterId": "string",
///   "vote": "up|down|none"
/// }
/// ```
async fn vote_post(req: web::Json<VotePostRequest>) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let VotePostRequest { mut post, voter_id, vote } = req.into_inner();
    let outcome = match vote {
        VoteAction::Up => post.cast_vote(&voter_id, Vote::Up),
        VoteAction::Down => post.cast_vote(&voter_id, Vote::Down),
        VoteAction::None => post.retract_vote(&voter_id),
    };

    tracing::debug!("Vote {:?} by {} on {}: {:?}", vote, voter_id, post.post_id, outcome);

    Ok(HttpResponse::Ok().json(VotePostResponse { post, outcome }))
}
