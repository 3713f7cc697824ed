//! Open-Meteo current-conditions adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::{ProviderOutcome, WeatherSource, ensure_success};
use crate::Result;
use crate::config::ProvidersConfig;
use crate::models::{GeoPoint, WeatherInfo};

/// Weather source backed by the Open-Meteo forecast endpoint
pub struct OpenMeteoWeather {
    client: Client,
    base_url: String,
}

/// Forecast response restricted to the `current` block
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub current: Option<CurrentData>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentData {
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
    pub weather_code: u16,
}

impl ForecastResponse {
    /// Convert to live weather info, `None` without a `current` block
    #[must_use]
    pub fn into_weather_info(self) -> Option<WeatherInfo> {
        self.current
            .map(|current| WeatherInfo::from_code(current.temperature, current.weather_code))
    }
}

impl OpenMeteoWeather {
    pub fn new(client: Client, providers: &ProvidersConfig) -> Self {
        Self {
            client,
            base_url: providers.weather_url.trim_end_matches('/').to_string(),
        }
    }

    fn forecast_url(&self, point: GeoPoint) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&current=temperature_2m,weather_code",
            self.base_url, point.latitude, point.longitude
        )
    }

    async fn fetch(&self, point: GeoPoint) -> Result<ForecastResponse> {
        let response = self
            .client
            .get(self.forecast_url(point))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let response = ensure_success("Open-Meteo", response).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoWeather {
    #[instrument(skip(self, point), fields(point = %point.format_coordinates()))]
    async fn current_weather(&self, point: GeoPoint) -> ProviderOutcome<WeatherInfo> {
        match self.fetch(point).await {
            Ok(forecast) => match forecast.into_weather_info() {
                Some(info) => {
                    debug!("Current weather: {} ({})", info.condition, info.format_temperature());
                    ProviderOutcome::Data(info)
                }
                None => {
                    warn!("Open-Meteo response has no current block");
                    ProviderOutcome::failed("missing current weather block")
                }
            },
            Err(e) => {
                warn!("Weather lookup failed: {}", e);
                ProviderOutcome::failed(e)
            }
        }
    }
}
