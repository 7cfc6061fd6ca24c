use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::insights::EngineSettings;
use crate::models::SimpleWeights;

const ENV_PREFIX: &str = "GROUPSYNC";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub insights: InsightSettings,
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

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub simple: SimpleWeightsConfig,
}

/// Weights of the additive 0-100 compatibility score
#[derive(Debug, Clone, Deserialize)]
pub struct SimpleWeightsConfig {
    #[serde(default = "default_shared_interest")]
    pub shared_interest: f64,
    #[serde(default = "default_age_bonus")]
    pub age_bonus: f64,
    #[serde(default = "default_age_window")]
    pub age_window: f64,
    #[serde(default = "default_budget_bonus")]
    pub budget_bonus: f64,
    #[serde(default = "default_budget_window")]
    pub budget_window: f64,
    #[serde(default = "default_style_bonus")]
    pub style_bonus: f64,
}

impl Default for SimpleWeightsConfig {
    fn default() -> Self {
        Self {
            shared_interest: default_shared_interest(),
            age_bonus: default_age_bonus(),
            age_window: default_age_window(),
            budget_bonus: default_budget_bonus(),
            budget_window: default_budget_window(),
            style_bonus: default_style_bonus(),
        }
    }
}

impl From<&SimpleWeightsConfig> for SimpleWeights {
    fn from(config: &SimpleWeightsConfig) -> Self {
        Self {
            shared_interest: config.shared_interest,
            age_bonus: config.age_bonus,
            age_window: config.age_window,
            budget_bonus: config.budget_bonus,
            budget_window: config.budget_window,
            style_bonus: config.style_bonus,
        }
    }
}

fn default_shared_interest() -> f64 { 25.0 }
fn default_age_bonus() -> f64 { 20.0 }
fn default_age_window() -> f64 { 5.0 }
fn default_budget_bonus() -> f64 { 20.0 }
fn default_budget_window() -> f64 { 5000.0 }
fn default_style_bonus() -> f64 { 10.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct InsightSettings {
    #[serde(default = "default_top_pairings_limit")]
    pub top_pairings_limit: usize,
    #[serde(default = "default_recent_feedback_limit")]
    pub recent_feedback_limit: usize,
    #[serde(default = "default_energy_trend_threshold")]
    pub energy_trend_threshold: f64,
}

impl Default for InsightSettings {
    fn default() -> Self {
        Self {
            top_pairings_limit: default_top_pairings_limit(),
            recent_feedback_limit: default_recent_feedback_limit(),
            energy_trend_threshold: default_energy_trend_threshold(),
        }
    }
}

fn default_top_pairings_limit() -> usize { 8 }
fn default_recent_feedback_limit() -> usize { 8 }
fn default_energy_trend_threshold() -> f64 { 5.0 }

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

impl LoggingSettings {
    pub fn log_format(&self) -> LogFormat {
        LogFormat::parse(&self.format)
    }
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    /// Unknown values fall back to json
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "compact" | "text" | "plain" => LogFormat::Compact,
            _ => LogFormat::Json,
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
    /// 4. Environment variables, e.g. GROUPSYNC__SERVER__PORT -> server.port
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Engine tunables assembled from the scoring and insights sections
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            simple_weights: SimpleWeights::from(&self.scoring.simple),
            top_pairings_limit: self.insights.top_pairings_limit,
            recent_feedback_limit: self.insights.recent_feedback_limit,
            energy_trend_threshold: self.insights.energy_trend_threshold,
        }
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
