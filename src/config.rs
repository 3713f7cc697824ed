//! Configuration management for Yatra
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::YatraError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for Yatra
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YatraConfig {
    /// Upstream provider endpoints
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Aggregation pipeline tuning
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Country the planner is scoped to
    #[serde(default)]
    pub region: RegionConfig,
    /// Booking lookup settings
    #[serde(default)]
    pub booking: BookingConfig,
    /// Map widget settings handed to the presentation layer
    #[serde(default)]
    pub map: MapConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream provider endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Base URL of the Nominatim geocoder
    pub geocoding_url: String,
    /// Base URL of the Open-Meteo forecast API
    pub weather_url: String,
    /// Base URL of the Overpass API
    pub overpass_url: String,
    /// Language preference sent to the geocoder
    pub accept_language: String,
    /// User agent for all outbound requests
    pub user_agent: String,
    /// Per-request transport timeout in seconds
    pub http_timeout_seconds: u32,
}

/// Aggregation pipeline tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Deadline for each raced provider call in milliseconds
    pub provider_timeout_ms: u64,
    /// Delay between provider launches in milliseconds
    pub stagger_ms: u64,
    /// Maximum accommodations/attractions kept from a provider
    pub max_results: usize,
    /// Search radius for attractions in meters
    pub attraction_radius_m: u32,
}

/// Country the planner is scoped to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// ISO 3166-1 alpha-2 code used as geocoder filter
    pub country_code: String,
    /// Country name appended to destinations
    pub country_name: String,
    /// Adjective used in generated descriptions
    pub demonym: String,
    /// ISO 4217 currency for accommodation prices
    pub currency: String,
}

/// Booking lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Base URL of the booking search API
    pub base_url: String,
    /// Booking API key (lookup is disabled without one)
    pub api_key: Option<String>,
}

/// Map widget settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    /// Access token for the map tile provider
    pub access_token: Option<String>,
    /// Initial map center as `[latitude, longitude]`
    pub center: [f64; 2],
    /// Initial zoom level
    pub zoom: f64,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_geocoding_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_weather_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_overpass_url() -> String {
    "https://overpass-api.de/api".to_string()
}

fn default_accept_language() -> String {
    "en".to_string()
}

fn default_user_agent() -> String {
    format!("Yatra/{}", env!("CARGO_PKG_VERSION"))
}

fn default_http_timeout() -> u32 {
    30
}

fn default_provider_timeout_ms() -> u64 {
    5000
}

fn default_stagger_ms() -> u64 {
    300
}

fn default_max_results() -> usize {
    5
}

fn default_attraction_radius() -> u32 {
    15_000
}

fn default_booking_url() -> String {
    "https://api.makcorps.com".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            weather_url: default_weather_url(),
            overpass_url: default_overpass_url(),
            accept_language: default_accept_language(),
            user_agent: default_user_agent(),
            http_timeout_seconds: default_http_timeout(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            provider_timeout_ms: default_provider_timeout_ms(),
            stagger_ms: default_stagger_ms(),
            max_results: default_max_results(),
            attraction_radius_m: default_attraction_radius(),
        }
    }
}

impl PipelineConfig {
    #[must_use]
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    #[must_use]
    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            country_code: "in".to_string(),
            country_name: "India".to_string(),
            demonym: "Indian".to_string(),
            currency: "INR".to_string(),
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            base_url: default_booking_url(),
            api_key: None,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        // Geographic center of India
        Self {
            access_token: None,
            center: [22.5937, 78.9629],
            zoom: 4.0,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl YatraConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

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

        // YATRA_PIPELINE__STAGGER_MS=0 overrides pipeline.stagger_ms
        builder = builder.add_source(
            Environment::with_prefix("YATRA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: YatraConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to deserialize configuration from {}", config_file.display()))?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("yatra").join("config.toml"))
    }

    /// Apply default values to blank configuration fields
    pub fn apply_defaults(&mut self) {
        if self.providers.geocoding_url.is_empty() {
            self.providers.geocoding_url = default_geocoding_url();
        }
        if self.providers.weather_url.is_empty() {
            self.providers.weather_url = default_weather_url();
        }
        if self.providers.overpass_url.is_empty() {
            self.providers.overpass_url = default_overpass_url();
        }
        if self.providers.accept_language.is_empty() {
            self.providers.accept_language = default_accept_language();
        }
        if self.providers.user_agent.is_empty() {
            self.providers.user_agent = default_user_agent();
        }
        if self.providers.http_timeout_seconds == 0 {
            self.providers.http_timeout_seconds = default_http_timeout();
        }
        if self.pipeline.max_results == 0 {
            self.pipeline.max_results = default_max_results();
        }
        if self.booking.base_url.is_empty() {
            self.booking.base_url = default_booking_url();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        if let Some(api_key) = &self.booking.api_key {
            if api_key.trim().is_empty() {
                return Err(YatraError::config(
                    "Booking API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }
        }

        if let Some(token) = &self.map.access_token {
            if token.trim().is_empty() {
                return Err(YatraError::config("Map access token cannot be empty if provided").into());
            }
        }

        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.pipeline.provider_timeout_ms == 0 || self.pipeline.provider_timeout_ms > 60_000 {
            return Err(YatraError::config(
                "Provider timeout must be between 1 and 60000 milliseconds",
            )
            .into());
        }

        if self.pipeline.stagger_ms > 10_000 {
            return Err(YatraError::config("Stagger delay cannot exceed 10000 milliseconds").into());
        }

        if self.pipeline.max_results > 50 {
            return Err(YatraError::config("Maximum results cannot exceed 50").into());
        }

        if self.providers.http_timeout_seconds > 300 {
            return Err(YatraError::config("HTTP timeout cannot exceed 300 seconds").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(YatraError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(YatraError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("geocoding", &self.providers.geocoding_url),
            ("weather", &self.providers.weather_url),
            ("overpass", &self.providers.overpass_url),
            ("booking", &self.booking.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(YatraError::config(format!(
                    "The {name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if self.region.country_code.len() != 2 {
            return Err(YatraError::config("Region country code must be a two-letter ISO code").into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = YatraConfig::default();
        assert_eq!(config.providers.weather_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.pipeline.provider_timeout_ms, 5000);
        assert_eq!(config.pipeline.stagger_ms, 300);
        assert_eq!(config.pipeline.max_results, 5);
        assert_eq!(config.region.currency, "INR");
        assert_eq!(config.logging.level, "info");
        assert!(config.booking.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pipeline_durations() {
        let pipeline = PipelineConfig::default();
        assert_eq!(pipeline.provider_timeout(), Duration::from_secs(5));
        assert_eq!(pipeline.stagger(), Duration::from_millis(300));
    }

    #[test]
    fn test_config_validation_blank_booking_key() {
        let mut config = YatraConfig::default();
        config.booking.api_key = Some("   ".to_string());
        let result = config.validate_api_keys();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = YatraConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = YatraConfig::default();
        config.pipeline.provider_timeout_ms = 120_000;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Provider timeout"));
    }

    #[test]
    fn test_config_validation_rejects_non_http_url() {
        let mut config = YatraConfig::default();
        config.providers.overpass_url = "ftp://overpass".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("overpass"));
    }

    #[test]
    fn test_apply_defaults_fills_blanks() {
        let mut config = YatraConfig::default();
        config.providers.geocoding_url.clear();
        config.logging.format.clear();
        config.apply_defaults();
        assert_eq!(config.providers.geocoding_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_missing_path_uses_defaults() {
        let config =
            YatraConfig::load_from_path(Some(PathBuf::from("does/not/exist.toml"))).unwrap();
        assert_eq!(config.region.country_name, "India");
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = YatraConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("yatra"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
