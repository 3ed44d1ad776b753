use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use mealweek_calendar::CalendarSettings;
use mealweek_mealplan::ScoringWeights;
use mealweek_store::Argon2Authenticator;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub storage: StorageConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub scoring: ScoringWeights,
    #[serde(default)]
    pub calendar: CalendarSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding one JSON file per stored key
    pub dir: String,
    /// Where exported `.ics` files are written
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
}

fn default_export_dir() -> String {
    ".".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    #[serde(default = "default_ttl_days")]
    pub ttl_days: i64,
    /// Argon2 PHC string; leave empty to run without a password
    #[serde(default)]
    pub password_hash: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_days: default_ttl_days(),
            password_hash: String::new(),
        }
    }
}

fn default_ttl_days() -> i64 {
    60
}

impl SessionConfig {
    pub fn authenticator(&self) -> Result<Option<Argon2Authenticator>, String> {
        if self.password_hash.is_empty() {
            return Ok(None);
        }

        Argon2Authenticator::new(self.password_hash.as_str())
            .map(Some)
            .map_err(|e| e.to_string())
    }
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MEALWEEK__STORAGE__DIR, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("storage.dir", ".mealweek")?
            .set_default("storage.export_dir", ".")?
            .set_default("session.ttl_days", 60)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional; a missing file falls back to defaults
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MEALWEEK")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.storage.dir.trim().is_empty() {
            return Err("Storage dir must not be empty".to_string());
        }
        if self.session.ttl_days < 1 {
            return Err("Session ttl_days must be at least 1".to_string());
        }
        if !(self.scoring.shortlist_ratio > 0.0 && self.scoring.shortlist_ratio <= 1.0) {
            return Err("Scoring shortlist_ratio must be in (0, 1]".to_string());
        }
        if self.scoring.freshness_cap_days < 0 {
            return Err("Scoring freshness_cap_days must not be negative".to_string());
        }
        self.calendar.validate().map_err(|e| e.to_string())?;
        self.session.authenticator()?;

        Ok(())
    }
}
