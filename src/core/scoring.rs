use crate::models::{Profile, ProfileScore, ScoreBreakdown, ScoringWeights};

/// Lower bounds of each level, highest first
const LEVEL_THRESHOLDS: [(f64, u8); 6] = [(7.0, 7), (6.0, 6), (5.0, 5), (4.0, 4), (3.0, 3), (2.0, 2)];

/// Composite engagement scorer
///
/// Scoring formula:
/// score = (
///     average_rating * 0.1 +
///     matches_per_swipe_right * gender_multiplier * 0.1 +
///     average_upvotes_per_post * 0.1 +
///     swipe_right_to_left_ratio * gender_multiplier * 0.1 +
///     followers * 0.05 +
///     following * 0.03 +
///     income_bonus +                      # low 0.0, medium 0.2, high 0.4
///     (upvotes - downvotes) * 0.05
/// )
///
/// Every term but the income bonus is clamped at zero before summing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEngine {
    weights: ScoringWeights,
}

impl ScoreEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn compute_score(&self, profile: &Profile) -> f64 {
        self.breakdown(profile).total()
    }

    pub fn score_profile(&self, profile: &Profile) -> ProfileScore {
        let score = self.compute_score(profile);
        ProfileScore {
            score,
            level: derive_level(score),
        }
    }

    /// Individual contribution of each term
    pub fn breakdown(&self, profile: &Profile) -> ScoreBreakdown {
        let w = &self.weights;
        let multiplier = w.gender_multipliers.for_gender(&profile.gender);

        let match_rate = ratio(profile.match_count as f64, profile.number_of_swipe_rights as f64);
        let swipe_ratio = ratio(
            profile.number_of_swipe_rights as f64,
            profile.number_of_swipe_lefts as f64,
        );
        let upvotes_per_post = ratio(profile.cumulative_upvotes as f64, profile.post_count as f64);
        let net_votes = profile.cumulative_upvotes as f64 - profile.cumulative_downvotes as f64;

        ScoreBreakdown {
            rating: non_negative(profile.average_rating() * w.rating),
            match_rate: non_negative(match_rate * multiplier * w.match_rate),
            upvotes: non_negative(upvotes_per_post * w.upvote),
            swipe_ratio: non_negative(swipe_ratio * multiplier * w.swipe_ratio),
            followers: non_negative(profile.followers_count as f64 * w.followers),
            following: non_negative(profile.following_count as f64 * w.following),
            income: w.income_bonus.for_level(profile.income()),
            engagement: non_negative(net_votes * w.engagement),
        }
    }
}

/// Map a composite score to a level in 1..=7
pub fn derive_level(score: f64) -> u8 {
    LEVEL_THRESHOLDS
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map(|(_, level)| *level)
        .unwrap_or(1)
}

#[inline]
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Clamp to zero; NaN also becomes zero
#[inline]
fn non_negative(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, IncomeLevel};

    fn create_test_profile(gender: &str) -> Profile {
        Profile {
            user_id: "test_user".to_string(),
            name: "Test User".to_string(),
            gender: Gender::parse(gender),
            followers_count: 10,
            following_count: 20,
            cumulative_upvotes: 30,
            cumulative_downvotes: 10,
            post_count: 3,
            number_of_swipe_rights: 8,
            number_of_swipe_lefts: 4,
            match_count: 2,
            ratings: vec![4.0, 5.0],
            ..Profile::default()
        }
    }

    #[test]
    fn test_breakdown_terms() {
        let engine = ScoreEngine::default();
        let breakdown = engine.breakdown(&create_test_profile("female"));

        assert!((breakdown.rating - 0.45).abs() < 1e-9);
        assert!((breakdown.match_rate - 0.025).abs() < 1e-9);
        assert!((breakdown.upvotes - 1.0).abs() < 1e-9);
        assert!((breakdown.swipe_ratio - 0.2).abs() < 1e-9);
        assert!((breakdown.followers - 0.5).abs() < 1e-9);
        assert!((breakdown.following - 0.6).abs() < 1e-9);
        assert_eq!(breakdown.income, 0.0);
        assert!((breakdown.engagement - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_gender_multiplier_applies_to_swipe_terms() {
        let engine = ScoreEngine::default();
        let female = engine.breakdown(&create_test_profile("female"));
        let male = engine.breakdown(&create_test_profile("Male"));
        let non_binary = engine.breakdown(&create_test_profile("non-binary"));

        assert!((male.swipe_ratio - female.swipe_ratio * 1.5).abs() < 1e-9);
        assert!((male.match_rate - female.match_rate * 1.5).abs() < 1e-9);
        assert!((non_binary.swipe_ratio - female.swipe_ratio * 1.2).abs() < 1e-9);
        assert_eq!(male.followers, female.followers);
    }

    #[test]
    fn test_income_bonus() {
        let engine = ScoreEngine::default();
        let mut profile = create_test_profile("female");
        let base = engine.compute_score(&profile);

        profile.claimed_income_level = Some(IncomeLevel::High);
        assert!((engine.compute_score(&profile) - base - 0.4).abs() < 1e-9);

        profile.claimed_income_level = Some(IncomeLevel::Medium);
        assert!((engine.compute_score(&profile) - base - 0.2).abs() < 1e-9);

        profile.claimed_income_level = Some(IncomeLevel::Unknown);
        assert_eq!(engine.compute_score(&profile), base);
    }

    #[test]
    fn test_negative_engagement_clamped() {
        let engine = ScoreEngine::default();
        let mut profile = create_test_profile("female");
        profile.cumulative_upvotes = 0;
        profile.cumulative_downvotes = 500;

        assert_eq!(engine.breakdown(&profile).engagement, 0.0);
    }

    #[test]
    fn test_zero_denominators() {
        let engine = ScoreEngine::default();
        let profile = Profile::new("empty");
        let breakdown = engine.breakdown(&profile);

        assert_eq!(breakdown.match_rate, 0.0);
        assert_eq!(breakdown.swipe_ratio, 0.0);
        assert_eq!(breakdown.upvotes, 0.0);
        assert_eq!(engine.compute_score(&profile), 0.0);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(derive_level(0.0), 1);
        assert_eq!(derive_level(1.99), 1);
        assert_eq!(derive_level(2.0), 2);
        assert_eq!(derive_level(6.99), 6);
        assert_eq!(derive_level(7.0), 7);
        assert_eq!(derive_level(120.0), 7);
        assert_eq!(derive_level(-3.0), 1);
        assert_eq!(derive_level(f64::NAN), 1);
    }

    #[test]
    fn test_custom_weights() {
        let weights = ScoringWeights {
            followers: 1.0,
            ..ScoringWeights::default()
        };
        let engine = ScoreEngine::new(weights);
        let breakdown = engine.breakdown(&create_test_profile("female"));

        assert_eq!(breakdown.followers, 10.0);
    }
}
