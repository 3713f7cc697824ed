//! Nominatim geocoder restricted to one country

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::{Geocoder, ensure_success};
use crate::config::{ProvidersConfig, RegionConfig};
use crate::models::GeoPoint;
use crate::{Result, YatraError};

/// Geocoder backed by the Nominatim search endpoint
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
    country_code: String,
    accept_language: String,
}

/// One candidate from Nominatim; coordinates arrive as strings
#[derive(Debug, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    pub display_name: Option<String>,
}

impl NominatimPlace {
    pub fn to_geo_point(&self) -> Result<GeoPoint> {
        let latitude: f64 = self
            .lat
            .trim()
            .parse()
            .map_err(|_| YatraError::api(format!("Invalid latitude from geocoder: {}", self.lat)))?;
        let longitude: f64 = self
            .lon
            .trim()
            .parse()
            .map_err(|_| YatraError::api(format!("Invalid longitude from geocoder: {}", self.lon)))?;
        let point = GeoPoint::new(latitude, longitude);
        if !point.is_valid() {
            return Err(YatraError::api(format!(
                "Geocoder returned out-of-range coordinates: {}",
                point.format_coordinates()
            )));
        }
        Ok(point)
    }
}

impl NominatimGeocoder {
    pub fn new(client: Client, providers: &ProvidersConfig, region: &RegionConfig) -> Self {
        Self {
            client,
            base_url: providers.geocoding_url.trim_end_matches('/').to_string(),
            country_code: region.country_code.to_lowercase(),
            accept_language: providers.accept_language.clone(),
        }
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search?format=json&q={}&countrycodes={}",
            self.base_url,
            urlencoding::encode(query),
            self.country_code
        )
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<GeoPoint> {
        let response = self
            .client
            .get(self.search_url(query))
            .header(reqwest::header::ACCEPT_LANGUAGE, &self.accept_language)
            .send()
            .await?;
        let response = ensure_success("Nominatim", response).await?;

        let places: Vec<NominatimPlace> = response.json().await?;
        let Some(first) = places.first() else {
            warn!("No geocoding results for '{}'", query);
            return Err(YatraError::location_not_found(query));
        };

        let point = first.to_geo_point()?;
        debug!(
            "Geocoded '{}' to {} ({})",
            query,
            point.format_coordinates(),
            first.display_name.as_deref().unwrap_or("unnamed")
        );
        Ok(point)
    }
}
