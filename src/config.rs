use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
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
pub struct DatasetSettings {
    /// CSV file loaded at startup, if any
    pub path: Option<String>,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default = "default_sample_rows")]
    pub sample_rows: usize,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: None,
            max_upload_bytes: default_max_upload_bytes(),
            sample_rows: default_sample_rows(),
        }
    }
}

fn default_max_upload_bytes() -> usize { 50 * 1024 * 1024 }
fn default_sample_rows() -> usize { 5 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_threshold")]
    pub default_threshold: u8,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_threshold: default_threshold(),
        }
    }
}

fn default_threshold() -> u8 { 60 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_first_name_weight")]
    pub first_name: f64,
    #[serde(default = "default_last_name_weight")]
    pub last_name: f64,
    #[serde(default = "default_date_of_birth_weight")]
    pub date_of_birth: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            first_name: default_first_name_weight(),
            last_name: default_last_name_weight(),
            date_of_birth: default_date_of_birth_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            first_name: config.first_name,
            last_name: config.last_name,
            date_of_birth: config.date_of_birth,
        }
    }
}

fn default_first_name_weight() -> f64 { 0.4 }
fn default_last_name_weight() -> f64 { 0.4 }
fn default_date_of_birth_weight() -> f64 { 0.2 }

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
    /// 4. Environment variables (prefixed with PATTERN_SEARCH__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PATTERN_SEARCH__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        settings.try_deserialize()
    }

    /// Scoring weights as used by the matcher
    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("PATTERN_SEARCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
