use chrono::{FixedOffset, Offset, Utc};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::error::DomainError;
use crate::models::QualityWeights;
use crate::services::DailyConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub daily: DailySettings,
    #[serde(default)]
    pub undo: UndoSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailySettings {
    #[serde(default = "default_daily_like_limit")]
    pub like_limit: u32,
    #[serde(default = "default_daily_pass_limit")]
    pub pass_limit: u32,
    #[serde(default)]
    pub unlimited_likes: bool,
    #[serde(default)]
    pub unlimited_passes: bool,
    /// Offset from UTC, in minutes, defining the local day boundary
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

fn default_daily_like_limit() -> u32 { 100 }
fn default_daily_pass_limit() -> u32 { 100 }

impl Default for DailySettings {
    fn default() -> Self {
        Self {
            like_limit: default_daily_like_limit(),
            pass_limit: default_daily_pass_limit(),
            unlimited_likes: false,
            unlimited_passes: false,
            utc_offset_minutes: 0,
        }
    }
}

impl DailySettings {
    /// The configured local timezone; out-of-range offsets fall back to UTC
    pub fn timezone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }

    /// Builds the runtime configuration for the daily service
    pub fn to_daily_config(&self) -> DailyConfig {
        DailyConfig {
            like_limit: self.like_limit,
            pass_limit: self.pass_limit,
            unlimited_likes: self.unlimited_likes,
            unlimited_passes: self.unlimited_passes,
            timezone: self.timezone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UndoSettings {
    #[serde(default = "default_undo_window_seconds")]
    pub window_seconds: u64,
}

fn default_undo_window_seconds() -> u64 { 30 }

impl Default for UndoSettings {
    fn default() -> Self {
        Self { window_seconds: default_undo_window_seconds() }
    }
}

impl UndoSettings {
    pub fn window(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.window_seconds)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_distance_weight")]
    pub distance: f64,
    #[serde(default = "default_age_weight")]
    pub age: f64,
    #[serde(default = "default_interest_weight")]
    pub interest: f64,
    #[serde(default = "default_lifestyle_weight")]
    pub lifestyle: f64,
    #[serde(default = "default_pace_weight")]
    pub pace: f64,
    #[serde(default = "default_response_weight")]
    pub response: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            distance: default_distance_weight(),
            age: default_age_weight(),
            interest: default_interest_weight(),
            lifestyle: default_lifestyle_weight(),
            pace: default_pace_weight(),
            response: default_response_weight(),
        }
    }
}

impl WeightsConfig {
    /// Validates the configured weights into usable quality weights
    pub fn to_quality_weights(&self) -> Result<QualityWeights, DomainError> {
        QualityWeights::new(
            self.distance,
            self.age,
            self.interest,
            self.lifestyle,
            self.pace,
            self.response,
        )
    }
}

fn default_distance_weight() -> f64 { 0.15 }
fn default_age_weight() -> f64 { 0.10 }
fn default_interest_weight() -> f64 { 0.25 }
fn default_lifestyle_weight() -> f64 { 0.25 }
fn default_pace_weight() -> f64 { 0.10 }
fn default_response_weight() -> f64 { 0.15 }

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
    /// 4. Environment variables (prefixed with EMBER_)
    ///    e.g. EMBER_DAILY__LIKE_LIMIT -> daily.like_limit
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("EMBER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("EMBER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
