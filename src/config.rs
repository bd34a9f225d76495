//! Configuration management for the weathervane service
//!
//! Handles loading configuration from a TOML file and environment
//! variables, and provides validation for all configuration settings.

use crate::WeathervaneError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the weathervane service
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WeathervaneConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Search history persistence configuration
    #[serde(default)]
    pub history: HistoryConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to bind the listener to
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Upstream weather API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeather API key. Absence is logged at startup but not fatal;
    /// the first lookup fails (or falls back to mock data) instead.
    pub api_key: Option<String>,
    /// Base URL for the geocoding endpoint
    #[serde(default = "default_geocode_base_url")]
    pub geocode_base_url: String,
    /// Base URL for the forecast endpoint
    #[serde(default = "default_forecast_base_url")]
    pub forecast_base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Search history persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Path of the JSON history file, relative to the deployment
    #[serde(default = "default_history_file")]
    pub file_path: String,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_port() -> u16 {
    3001
}

fn default_geocode_base_url() -> String {
    "https://api.openweathermap.org/geo/1.0/direct".to_string()
}

fn default_forecast_base_url() -> String {
    "https://api.openweathermap.org/data/2.5/forecast".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_history_file() -> String {
    "db/db.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            geocode_base_url: default_geocode_base_url(),
            forecast_base_url: default_forecast_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            file_path: default_history_file(),
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

impl WeathervaneConfig {
    /// Load configuration from `config.toml` and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from the specified path, with environment
    /// variable overrides under the `WEATHERVANE_` prefix
    /// (e.g. `WEATHERVANE_WEATHER__API_KEY`).
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("WEATHERVANE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: WeathervaneConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if let Some(api_key) = &self.weather.api_key {
            if api_key.is_empty() {
                return Err(WeathervaneError::config(
                    "Weather API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }
        }

        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            return Err(WeathervaneError::config(
                "Weather API timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        for url in [
            &self.weather.geocode_base_url,
            &self.weather.forecast_base_url,
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WeathervaneError::config(
                    "Weather API base URLs must be valid HTTP or HTTPS URLs",
                )
                .into());
            }
        }

        if self.history.file_path.is_empty() {
            return Err(
                WeathervaneError::config("History file path cannot be empty").into(),
            );
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeathervaneError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
