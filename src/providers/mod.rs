//! Provider adapters
//!
//! Each adapter talks to one third-party service and normalizes its payload:
//! - Geocoding: Nominatim name search restricted to one country
//! - Weather: Open-Meteo current conditions
//! - Accommodation and attractions: Overpass proximity search
//!
//! Enrichment adapters never return errors. Every failure mode collapses into a
//! [`ProviderOutcome`] so the aggregator can merge with a total match.

pub mod accommodation;
pub mod attractions;
pub mod geocoding;
pub mod overpass;
pub mod weather;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::ProvidersConfig;
use crate::models::{AccommodationOption, AttractionInfo, Budget, GeoPoint, WeatherInfo};
use crate::{Result, YatraError};

pub use accommodation::OverpassAccommodations;
pub use attractions::OverpassAttractions;
pub use geocoding::NominatimGeocoder;
pub use overpass::{OverpassClient, OverpassElement};
pub use weather::OpenMeteoWeather;

/// Result of one enrichment call
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome<T> {
    /// Usable data
    Data(T),
    /// Well-formed response with nothing usable
    Empty,
    /// Transport error, bad status, malformed payload, or timeout
    Failed(String),
}

impl<T> ProviderOutcome<T> {
    pub fn failed(reason: impl fmt::Display) -> Self {
        ProviderOutcome::Failed(reason.to_string())
    }

    /// Short label for logs
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderOutcome::Data(_) => "data",
            ProviderOutcome::Empty => "empty",
            ProviderOutcome::Failed(_) => "failed",
        }
    }
}

impl<T> ProviderOutcome<Vec<T>> {
    /// `Data` for a non-empty list, `Empty` otherwise.
    #[must_use]
    pub fn from_list(items: Vec<T>) -> Self {
        if items.is_empty() {
            ProviderOutcome::Empty
        } else {
            ProviderOutcome::Data(items)
        }
    }
}

/// Resolves destination names to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// First match for `query`, or `LocationNotFound`.
    async fn geocode(&self, query: &str) -> Result<GeoPoint>;
}

#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current_weather(&self, point: GeoPoint) -> ProviderOutcome<WeatherInfo>;
}

#[async_trait]
pub trait AccommodationSource: Send + Sync {
    async fn accommodations(
        &self,
        point: GeoPoint,
        budget: Budget,
        destination: &str,
    ) -> ProviderOutcome<Vec<AccommodationOption>>;
}

#[async_trait]
pub trait AttractionSource: Send + Sync {
    async fn attractions(
        &self,
        point: GeoPoint,
        destination: &str,
    ) -> ProviderOutcome<Vec<AttractionInfo>>;
}

/// Build the HTTP client shared by all adapters
pub fn build_http_client(config: &ProvidersConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_seconds.into()))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| YatraError::config(format!("Failed to create HTTP client: {e}")))
}

/// Turn a non-2xx response into an API error carrying the body text
pub(crate) async fn ensure_success(
    service: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(YatraError::api(format!("{service} returned {status}: {body}")))
}

/// Round to one decimal place
pub(crate) fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
