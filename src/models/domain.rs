use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Gender as reported on a profile
///
/// Parsed once at the boundary so call sites never compare raw labels.
/// Unrecognized labels are kept (lowercased) so equality filters still work.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    Other(String),
}

impl Gender {
    pub fn parse(label: &str) -> Self {
        let normalized = label.trim().to_lowercase();
        match normalized.as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            "non-binary" | "non_binary" | "nonbinary" => Gender::NonBinary,
            _ => Gender::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::NonBinary => "non-binary",
            Gender::Other(label) => label,
        }
    }

    /// True for the empty label produced by a missing gender field
    pub fn is_unspecified(&self) -> bool {
        matches!(self, Gender::Other(label) if label.is_empty())
    }
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Other(String::new())
    }
}

impl From<String> for Gender {
    fn from(label: String) -> Self {
        Gender::parse(&label)
    }
}

impl From<&str> for Gender {
    fn from(label: &str) -> Self {
        Gender::parse(label)
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.as_str().to_string()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported income tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeLevel {
    Low,
    Medium,
    High,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A point on the globe in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// User profile as stored in the profiles collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Textual day/month/year, only used to derive an age
    #[serde(default, deserialize_with = "blank_as_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub locality: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub hometown: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub high_school: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub college: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub post_grad: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub work: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: Gender,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub followers_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub following_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cumulative_upvotes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cumulative_downvotes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub post_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub number_of_swipe_rights: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub number_of_swipe_lefts: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub match_count: u32,
    /// Individual ratings received, when the backend ships them
    #[serde(default, deserialize_with = "null_as_default")]
    pub ratings: Vec<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating_sum: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub number_of_ratings: u32,
    #[serde(default)]
    pub claimed_income_level: Option<IncomeLevel>,
    /// Auxiliary engagement ("vibe") metric, independent of the composite score
    #[serde(default)]
    pub vibe: Option<f64>,
}

impl Profile {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    /// Mean rating in [0, 5]
    ///
    /// Individual ratings win over the running sum; no ratings at all is 0.
    pub fn average_rating(&self) -> f64 {
        let average = if !self.ratings.is_empty() {
            self.ratings.iter().sum::<f64>() / self.ratings.len() as f64
        } else if self.number_of_ratings > 0 {
            self.rating_sum / self.number_of_ratings as f64
        } else {
            0.0
        };

        if average.is_nan() {
            0.0
        } else {
            average.clamp(0.0, 5.0)
        }
    }

    pub fn location(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint::new(latitude, longitude)),
            _ => None,
        }
    }

    pub fn vibe_metric(&self) -> f64 {
        self.vibe.unwrap_or(0.0)
    }

    pub fn income(&self) -> IncomeLevel {
        self.claimed_income_level.unwrap_or_default()
    }
}

/// Kind of content carried by a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    #[default]
    Text,
    Photo,
    Video,
    Voice,
}

/// Comment attached to a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub comment_id: String,
    pub author_id: String,
    #[serde(default)]
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A piece of user content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub post_id: String,
    pub author_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kind: PostKind,
    /// Text body, or the media URL for photo/video/voice posts
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location_tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upvotes: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub downvotes: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upvoted_users: BTreeSet<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub downvoted_users: BTreeSet<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<Comment>,
}

impl Post {
    pub fn new(post_id: impl Into<String>, author_id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            post_id: post_id.into(),
            author_id: author_id.into(),
            author_name: String::new(),
            created_at,
            kind: PostKind::Text,
            content: String::new(),
            tags: Vec::new(),
            location_tags: Vec::new(),
            upvotes: 0,
            downvotes: 0,
            upvoted_users: BTreeSet::new(),
            downvoted_users: BTreeSet::new(),
            comments: Vec::new(),
        }
    }

    /// Upvotes minus downvotes
    pub fn net_votes(&self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }
}

/// Inclusive age bounds; a zero bound leaves the range inactive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub start: u32,
    pub end: u32,
}

impl AgeRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn is_active(&self) -> bool {
        self.start != 0 && self.end != 0
    }

    pub fn contains(&self, age: u32) -> bool {
        age >= self.start && age <= self.end
    }
}

/// Average-rating buckets offered by the filter screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RatingBucket {
    #[serde(rename = "0-1.9")]
    Low,
    #[serde(rename = "2-3.9")]
    Mid,
    #[serde(rename = "4-5")]
    High,
    #[default]
    #[serde(other)]
    Any,
}

impl RatingBucket {
    /// Inclusive bounds of the bucket
    pub fn bounds(self) -> (f64, f64) {
        match self {
            RatingBucket::Low => (0.0, 1.9),
            RatingBucket::Mid => (2.0, 3.9),
            RatingBucket::High => (4.0, 5.0),
            RatingBucket::Any => (0.0, 5.0),
        }
    }

    pub fn contains(self, rating: f64) -> bool {
        let (low, high) = self.bounds();
        rating >= low && rating <= high
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Age,
    Rating,
    Engagement,
    #[default]
    #[serde(other)]
    Rank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// User-selected filter and sort state
///
/// Every constraint is independently optional. Blank strings and the `"All"`
/// city sentinel sent by older clients deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterConfig {
    #[serde(deserialize_with = "city_as_option")]
    pub city: Option<String>,
    pub localities: BTreeSet<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub high_school: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub college: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub post_grad: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub work: Option<String>,
    pub age_range: Option<AgeRange>,
    pub rating: Option<RatingBucket>,
    #[serde(deserialize_with = "gender_as_option")]
    pub gender: Option<Gender>,
    /// Advisory search radius, reported back but never used to exclude
    pub distance_km: Option<f64>,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
}

/// Tunable weights of the composite score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub rating: f64,
    pub match_rate: f64,
    pub upvote: f64,
    pub swipe_ratio: f64,
    pub followers: f64,
    pub following: f64,
    pub engagement: f64,
    pub gender_multipliers: GenderMultipliers,
    pub income_bonus: IncomeBonus,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            rating: 0.1,
            match_rate: 0.1,
            upvote: 0.1,
            swipe_ratio: 0.1,
            followers: 0.05,
            following: 0.03,
            engagement: 0.05,
            gender_multipliers: GenderMultipliers::default(),
            income_bonus: IncomeBonus::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenderMultipliers {
    pub male: f64,
    pub non_binary: f64,
    pub other: f64,
}

impl Default for GenderMultipliers {
    fn default() -> Self {
        Self {
            male: 1.5,
            non_binary: 1.2,
            other: 1.0,
        }
    }
}

impl GenderMultipliers {
    pub fn for_gender(&self, gender: &Gender) -> f64 {
        match gender {
            Gender::Male => self.male,
            Gender::NonBinary => self.non_binary,
            Gender::Female | Gender::Other(_) => self.other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncomeBonus {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for IncomeBonus {
    fn default() -> Self {
        Self {
            low: 0.0,
            medium: 0.2,
            high: 0.4,
        }
    }
}

impl IncomeBonus {
    pub fn for_level(&self, level: IncomeLevel) -> f64 {
        match level {
            IncomeLevel::Low => self.low,
            IncomeLevel::Medium => self.medium,
            IncomeLevel::High => self.high,
            IncomeLevel::Unknown => 0.0,
        }
    }
}

/// Per-term contributions to a composite score
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub rating: f64,
    pub match_rate: f64,
    pub upvotes: f64,
    pub swipe_ratio: f64,
    pub followers: f64,
    pub following: f64,
    pub income: f64,
    pub engagement: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.rating
            + self.match_rate
            + self.upvotes
            + self.swipe_ratio
            + self.followers
            + self.following
            + self.income
            + self.engagement
    }
}

/// Score and level computed for presentation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileScore {
    pub score: f64,
    pub level: u8,
}

/// Profile that survived filtering, with its derived fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedProfile {
    pub profile: Profile,
    pub score: f64,
    pub level: u8,
    pub age: Option<u32>,
    pub distance_km: Option<f64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn city_as_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = blank_as_none(deserializer)?;
    Ok(value.filter(|city| !city.trim().eq_ignore_ascii_case("all")))
}

fn gender_as_option<'de, D>(deserializer: D) -> Result<Option<Gender>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(blank_as_none(deserializer)?.map(Gender::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parsing() {
        assert_eq!(Gender::parse("MALE"), Gender::Male);
        assert_eq!(Gender::parse(" Female "), Gender::Female);
        assert_eq!(Gender::parse("Non-Binary"), Gender::NonBinary);
        assert_eq!(Gender::parse("agender"), Gender::Other("agender".to_string()));
        assert!(Gender::parse("").is_unspecified());
    }

    #[test]
    fn test_average_rating_sources() {
        let mut profile = Profile::new("u1");
        assert_eq!(profile.average_rating(), 0.0);

        profile.rating_sum = 12.0;
        profile.number_of_ratings = 3;
        assert_eq!(profile.average_rating(), 4.0);

        profile.ratings = vec![1.0, 2.0];
        assert_eq!(profile.average_rating(), 1.5);

        profile.ratings = vec![9.0];
        assert_eq!(profile.average_rating(), 5.0);
    }

    #[test]
    fn test_profile_deserializes_blank_fields_as_none() {
        let json = r#"{
            "userId": "u1",
            "city": "",
            "college": "  ",
            "gender": "Male",
            "claimedIncomeLevel": "premium"
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.city, None);
        assert_eq!(profile.college, None);
        assert_eq!(profile.gender, Gender::Male);
        assert_eq!(profile.income(), IncomeLevel::Unknown);
    }

    #[test]
    fn test_profile_null_fields_fall_back_to_defaults() {
        let json = r#"{
            "userId": "u1",
            "name": null,
            "gender": null,
            "followersCount": null,
            "cumulativeUpvotes": null,
            "postCount": null,
            "ratings": null,
            "ratingSum": null,
            "numberOfRatings": 2
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.name, "");
        assert!(profile.gender.is_unspecified());
        assert_eq!(profile.followers_count, 0);
        assert_eq!(profile.cumulative_upvotes, 0);
        assert_eq!(profile.post_count, 0);
        assert!(profile.ratings.is_empty());
        assert_eq!(profile.number_of_ratings, 2);
        assert_eq!(profile.average_rating(), 0.0);
    }

    #[test]
    fn test_post_null_fields_fall_back_to_defaults() {
        let json = r#"{
            "postId": "p1",
            "authorId": "a1",
            "createdAt": "2024-05-01T10:00:00Z",
            "kind": null,
            "tags": null,
            "upvotes": null,
            "upvotedUsers": null,
            "comments": null
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();

        assert_eq!(post.kind, PostKind::Text);
        assert!(post.tags.is_empty());
        assert_eq!(post.upvotes, 0);
        assert!(post.upvoted_users.is_empty());
        assert!(post.comments.is_empty());
    }

    #[test]
    fn test_sort_key_names() {
        let parse = |key: &str| -> SortKey { serde_json::from_value(serde_json::json!(key)).unwrap() };

        assert_eq!(parse("age"), SortKey::Age);
        assert_eq!(parse("rating"), SortKey::Rating);
        assert_eq!(parse("engagement"), SortKey::Engagement);
        assert_eq!(parse("rank"), SortKey::Rank);
        assert_eq!(parse("popularity"), SortKey::Rank);
        assert_eq!(SortKey::default(), SortKey::Rank);
    }

    #[test]
    fn test_filter_config_sentinels() {
        let json = r#"{
            "city": "All",
            "highSchool": "",
            "gender": "",
            "rating": "3-5",
            "sortKey": "popularity",
            "sortDirection": "desc"
        }"#;
        let config: FilterConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.city, None);
        assert_eq!(config.high_school, None);
        assert_eq!(config.gender, None);
        assert_eq!(config.rating, Some(RatingBucket::Any));
        assert_eq!(config.sort_key, SortKey::Rank);
        assert_eq!(config.sort_direction, SortDirection::Descending);
    }

    #[test]
    fn test_rating_bucket_bounds() {
        assert!(RatingBucket::Low.contains(1.9));
        assert!(!RatingBucket::Mid.contains(1.9));
        assert!(RatingBucket::Mid.contains(2.0));
        assert!(!RatingBucket::Low.contains(2.0));
        assert!(!RatingBucket::Mid.contains(3.95));
        assert!(!RatingBucket::High.contains(3.95));
        assert!(RatingBucket::Any.contains(3.95));
    }

    #[test]
    fn test_age_range_activity() {
        assert!(!AgeRange::new(0, 0).is_active());
        assert!(!AgeRange::new(18, 0).is_active());
        assert!(AgeRange::new(18, 30).is_active());
        assert!(AgeRange::new(18, 30).contains(30));
        assert!(!AgeRange::new(18, 30).contains(31));
    }
}
