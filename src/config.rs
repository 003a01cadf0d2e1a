//! Configuration management for the `skywatch` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings. Configuration
//! is loaded once at startup and never mutated or reloaded mid-run.

use crate::SkywatchError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `skywatch` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkywatchConfig {
    /// Weather provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Chat notification configuration
    #[serde(default)]
    pub telegram: TelegramConfig,
    /// Alert threshold configuration
    #[serde(default)]
    pub thresholds: AlertThresholds,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather provider (OpenWeatherMap) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider API key
    #[serde(default)]
    pub api_key: String,
    /// Base URL for the provider API
    #[serde(default = "default_provider_base_url")]
    pub base_url: String,
    /// Provider city id for weather and forecast lookups
    #[serde(default = "default_city_id")]
    pub city_id: u64,
    /// Display name for the monitored city
    #[serde(default = "default_city_name")]
    pub city_name: String,
    /// Latitude for the air-quality lookup
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    /// Longitude for the air-quality lookup
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    /// Language code for condition descriptions
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Request timeout in seconds, applied per call
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Telegram chat sink settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token, embedded in the request path
    #[serde(default)]
    pub bot_token: String,
    /// Target chat identifier
    #[serde(default)]
    pub chat_id: String,
    /// Base URL for the Telegram Bot API
    #[serde(default = "default_telegram_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Threshold values for the alert rules.
///
/// The rain and snow rules are opt-in: an absent flag means the rule is
/// disabled, not that a default limit applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Heat alert at or above this temperature (°C)
    #[serde(default = "default_high_temp")]
    pub high_temp: f64,
    /// Cold alert at or below this temperature (°C)
    #[serde(default = "default_low_temp")]
    pub low_temp: f64,
    /// Wind alert at or above this speed (m/s)
    #[serde(default = "default_high_wind")]
    pub high_wind: f64,
    /// Haze alert above this AQI value
    #[serde(default = "default_aqi_limit")]
    pub aqi_limit: u16,
    /// Alert on moderate-or-heavier rain condition codes
    #[serde(default)]
    pub moderate_rain: bool,
    /// Alert on any snow condition codes
    #[serde(default)]
    pub any_snow: bool,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_provider_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_telegram_base_url() -> String {
    "https://api.telegram.org".to_string()
}

// Beijing; the air-quality endpoint wants coordinates rather than a city id
fn default_city_id() -> u64 {
    1_816_670
}

fn default_city_name() -> String {
    "Beijing".to_string()
}

fn default_latitude() -> f64 {
    39.9042
}

fn default_longitude() -> f64 {
    116.4074
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_high_temp() -> f64 {
    35.0
}

fn default_low_temp() -> f64 {
    -10.0
}

fn default_high_wind() -> f64 {
    10.0
}

fn default_aqi_limit() -> u16 {
    150
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            high_temp: default_high_temp(),
            low_temp: default_low_temp(),
            high_wind: default_high_wind(),
            aqi_limit: default_aqi_limit(),
            moderate_rain: false,
            any_snow: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_provider_base_url(),
            city_id: default_city_id(),
            city_name: default_city_name(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            lang: default_lang(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            base_url: default_telegram_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for SkywatchConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            telegram: TelegramConfig::default(),
            thresholds: AlertThresholds::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SkywatchConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with SKYWATCH_ prefix
        builder = builder.add_source(
            Environment::with_prefix("SKYWATCH")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: SkywatchConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        let local = PathBuf::from("config.toml");
        if local.exists() {
            return Some(local);
        }
        dirs::config_dir().map(|dir| dir.join("skywatch").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_credentials()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and chat credentials
    fn validate_credentials(&self) -> Result<()> {
        if self.provider.api_key.is_empty() {
            return Err(SkywatchError::config(
                "Provider api_key is required. Get one at https://openweathermap.org/api.",
            )
            .into());
        }

        if self.telegram.bot_token.is_empty() {
            return Err(SkywatchError::config(
                "Telegram bot_token is required. Create a bot via @BotFather.",
            )
            .into());
        }

        if self.telegram.chat_id.is_empty() {
            return Err(SkywatchError::config("Telegram chat_id is required.").into());
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.provider.latitude) {
            return Err(
                SkywatchError::config("Latitude must be between -90 and 90 degrees").into(),
            );
        }

        if !(-180.0..=180.0).contains(&self.provider.longitude) {
            return Err(
                SkywatchError::config("Longitude must be between -180 and 180 degrees").into(),
            );
        }

        if self.provider.timeout_seconds == 0 || self.telegram.timeout_seconds == 0 {
            return Err(SkywatchError::config("Request timeout must be at least 1 second").into());
        }

        if self.provider.timeout_seconds > 300 || self.telegram.timeout_seconds > 300 {
            return Err(
                SkywatchError::config("Request timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.thresholds.aqi_limit > 500 {
            return Err(SkywatchError::config("aqi_limit cannot exceed 500").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SkywatchError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        if !self.provider.base_url.starts_with("http://")
            && !self.provider.base_url.starts_with("https://")
        {
            return Err(SkywatchError::config(
                "Provider base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if !self.telegram.base_url.starts_with("http://")
            && !self.telegram.base_url.starts_with("https://")
        {
            return Err(SkywatchError::config(
                "Telegram base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}
