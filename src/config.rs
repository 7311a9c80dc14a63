use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::{GenderMultipliers, IncomeBonus, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    /// Largest snapshot accepted by a single ranking request
    #[serde(default = "default_max_records")]
    pub max_records: usize,
    /// Applied when a request does not set its own limit
    pub default_limit: Option<usize>,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            max_records: default_max_records(),
            default_limit: None,
        }
    }
}

fn default_max_records() -> usize { 5000 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub gender_multipliers: GenderMultiplierConfig,
    #[serde(default)]
    pub income_bonus: IncomeBonusConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_rating_weight")]
    pub rating: f64,
    #[serde(default = "default_match_rate_weight")]
    pub match_rate: f64,
    #[serde(default = "default_upvote_weight")]
    pub upvote: f64,
    #[serde(default = "default_swipe_ratio_weight")]
    pub swipe_ratio: f64,
    #[serde(default = "default_followers_weight")]
    pub followers: f64,
    #[serde(default = "default_following_weight")]
    pub following: f64,
    #[serde(default = "default_engagement_weight")]
    pub engagement: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            rating: default_rating_weight(),
            match_rate: default_match_rate_weight(),
            upvote: default_upvote_weight(),
            swipe_ratio: default_swipe_ratio_weight(),
            followers: default_followers_weight(),
            following: default_following_weight(),
            engagement: default_engagement_weight(),
        }
    }
}

fn default_rating_weight() -> f64 { 0.1 }
fn default_match_rate_weight() -> f64 { 0.1 }
fn default_upvote_weight() -> f64 { 0.1 }
fn default_swipe_ratio_weight() -> f64 { 0.1 }
fn default_followers_weight() -> f64 { 0.05 }
fn default_following_weight() -> f64 { 0.03 }
fn default_engagement_weight() -> f64 { 0.05 }

#[derive(Debug, Clone, Deserialize)]
pub struct GenderMultiplierConfig {
    #[serde(default = "default_male_multiplier")]
    pub male: f64,
    #[serde(default = "default_non_binary_multiplier")]
    pub non_binary: f64,
    #[serde(default = "default_other_multiplier")]
    pub other: f64,
}

impl Default for GenderMultiplierConfig {
    fn default() -> Self {
        Self {
            male: default_male_multiplier(),
            non_binary: default_non_binary_multiplier(),
            other: default_other_multiplier(),
        }
    }
}

fn default_male_multiplier() -> f64 { 1.5 }
fn default_non_binary_multiplier() -> f64 { 1.2 }
fn default_other_multiplier() -> f64 { 1.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct IncomeBonusConfig {
    #[serde(default = "default_low_income_bonus")]
    pub low: f64,
    #[serde(default = "default_medium_income_bonus")]
    pub medium: f64,
    #[serde(default = "default_high_income_bonus")]
    pub high: f64,
}

impl Default for IncomeBonusConfig {
    fn default() -> Self {
        Self {
            low: default_low_income_bonus(),
            medium: default_medium_income_bonus(),
            high: default_high_income_bonus(),
        }
    }
}

fn default_low_income_bonus() -> f64 { 0.0 }
fn default_medium_income_bonus() -> f64 { 0.2 }
fn default_high_income_bonus() -> f64 { 0.4 }

impl From<&ScoringSettings> for ScoringWeights {
    fn from(settings: &ScoringSettings) -> Self {
        let w = &settings.weights;
        Self {
            rating: w.rating,
            match_rate: w.match_rate,
            upvote: w.upvote,
            swipe_ratio: w.swipe_ratio,
            followers: w.followers,
            following: w.following,
            engagement: w.engagement,
            gender_multipliers: GenderMultipliers {
                male: settings.gender_multipliers.male,
                non_binary: settings.gender_multipliers.non_binary,
                other: settings.gender_multipliers.other,
            },
            income_bonus: IncomeBonus {
                low: settings.income_bonus.low,
                medium: settings.income_bonus.medium,
                high: settings.income_bonus.high,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with VIBE_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., VIBE__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("VIBE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
