use std::cmp::Ordering;
use chrono::{NaiveDate, Utc};
use crate::models::{FilterConfig, GeoPoint, Post, Profile, RankedProfile, ScoringWeights, SortKey};
use crate::core::{
    age::derive_age,
    distance::distance_from,
    filters::{matches_filter, matches_post_filter},
    scoring::{derive_level, ScoreEngine},
};

/// Per-call options beyond the filter configuration
#[derive(Debug, Clone, Copy)]
pub struct RankOptions {
    /// Reference date for age derivation
    pub today: NaiveDate,
    /// Viewer location, used only to annotate distances
    pub origin: Option<GeoPoint>,
    pub limit: Option<usize>,
}

impl RankOptions {
    pub fn on(today: NaiveDate) -> Self {
        Self {
            today,
            origin: None,
            limit: None,
        }
    }

    pub fn today() -> Self {
        Self::on(Utc::now().date_naive())
    }
}

/// Result of a ranking pass
#[derive(Debug)]
pub struct PipelineResult<T> {
    pub records: Vec<T>,
    pub total_candidates: usize,
}

/// Filter-then-sort pipeline over record snapshots
///
/// # Pipeline Stages
/// 1. Conjunctive filtering against the configured constraints
/// 2. Annotation with score, level, age and distance
/// 3. Stable sort on the configured key and direction
/// 4. Optional truncation
///
/// Holds nothing but scoring weights, so one value can serve concurrent callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    engine: ScoreEngine,
}

impl Pipeline {
    pub fn new(engine: ScoreEngine) -> Self {
        Self { engine }
    }

    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self::new(ScoreEngine::new(weights))
    }

    pub fn engine(&self) -> &ScoreEngine {
        &self.engine
    }

    /// Filter and order profiles as of today's date
    pub fn apply(&self, records: &[Profile], config: &FilterConfig) -> Vec<RankedProfile> {
        self.rank_profiles(records, config, &RankOptions::today()).records
    }

    /// Filter and order profiles as of `today`
    pub fn apply_on(&self, records: &[Profile], config: &FilterConfig, today: NaiveDate) -> Vec<RankedProfile> {
        self.rank_profiles(records, config, &RankOptions::on(today)).records
    }

    pub fn rank_profiles(
        &self,
        records: &[Profile],
        config: &FilterConfig,
        options: &RankOptions,
    ) -> PipelineResult<RankedProfile> {
        let total_candidates = records.len();

        let mut ranked: Vec<RankedProfile> = records
            .iter()
            // Stage 1: Filtering
            .filter(|profile| matches_filter(profile, config, options.today))
            // Stage 2: Annotation
            .map(|profile| {
                let score = self.engine.compute_score(profile);
                RankedProfile {
                    profile: profile.clone(),
                    score,
                    level: derive_level(score),
                    age: derive_age(profile.date_of_birth.as_deref(), options.today),
                    distance_km: distance_from(options.origin, profile.location()),
                }
            })
            .collect();

        // Stage 3: Stable sort
        ranked.sort_by(|a, b| {
            let ordering = match config.sort_key {
                SortKey::Age => a.age.unwrap_or(0).cmp(&b.age.unwrap_or(0)),
                SortKey::Rating => compare_f64(a.profile.average_rating(), b.profile.average_rating()),
                SortKey::Engagement => compare_f64(a.profile.vibe_metric(), b.profile.vibe_metric()),
                SortKey::Rank => compare_f64(a.score, b.score),
            };
            config.sort_direction.apply(ordering)
        });

        // Stage 4: Limit
        if let Some(limit) = options.limit {
            ranked.truncate(limit);
        }

        tracing::debug!(
            "Ranked {} of {} profiles by {:?} ({:?})",
            ranked.len(),
            total_candidates,
            config.sort_key,
            config.sort_direction
        );

        PipelineResult {
            records: ranked,
            total_candidates,
        }
    }

    /// Filter and order posts
    pub fn apply_posts(&self, posts: &[Post], config: &FilterConfig) -> Vec<Post> {
        self.rank_posts(posts, config, None).records
    }

    pub fn rank_posts(&self, posts: &[Post], config: &FilterConfig, limit: Option<usize>) -> PipelineResult<Post> {
        let total_candidates = posts.len();

        let mut ranked: Vec<Post> = posts
            .iter()
            .filter(|post| matches_post_filter(post, config))
            .cloned()
            .collect();

        ranked.sort_by(|a, b| {
            let ordering = match config.sort_key {
                SortKey::Age => a.created_at.cmp(&b.created_at),
                SortKey::Rating => a.upvotes.cmp(&b.upvotes),
                SortKey::Engagement | SortKey::Rank => a.net_votes().cmp(&b.net_votes()),
            };
            config.sort_direction.apply(ordering)
        });

        if let Some(limit) = limit {
            ranked.truncate(limit);
        }

        tracing::debug!("Ranked {} of {} posts by {:?}", ranked.len(), total_candidates, config.sort_key);

        PipelineResult {
            records: ranked,
            total_candidates,
        }
    }
}

/// Total order on sort values: NaN and negative zero compare as zero
#[inline]
fn compare_f64(a: f64, b: f64) -> Ordering {
    sort_value(a).total_cmp(&sort_value(b))
}

#[inline]
fn sort_value(value: f64) -> f64 {
    if value.is_nan() || value == 0.0 {
        0.0
    } else {
        value
    }
}
