//! Hotel booking lookup against the Makcorps search API
//!
//! The response is passed through untouched; only the request is typed.

use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use crate::config::{BookingConfig, ProvidersConfig};
use crate::providers::{build_http_client, ensure_success};
use crate::{Result, YatraError};

fn default_currency() -> String {
    "USD".to_string()
}

fn default_one() -> u32 {
    1
}

/// Parameters of one booking search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub country: String,
    #[serde(rename = "hotelid")]
    pub hotel_id: String,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub kids: u32,
    #[serde(default = "default_one")]
    pub adults: u32,
    #[serde(default = "default_one")]
    pub rooms: u32,
}

impl BookingRequest {
    pub fn validate(&self) -> Result<()> {
        if self.hotel_id.trim().is_empty() {
            return Err(YatraError::validation("Hotel id cannot be empty"));
        }
        if self.country.trim().is_empty() {
            return Err(YatraError::validation("Country cannot be empty"));
        }
        if self.checkout <= self.checkin {
            return Err(YatraError::validation(format!(
                "Checkout {} must be after checkin {}",
                self.checkout, self.checkin
            )));
        }
        if self.adults == 0 {
            return Err(YatraError::validation("At least one adult is required"));
        }
        if self.rooms == 0 {
            return Err(YatraError::validation("At least one room is required"));
        }
        Ok(())
    }

    fn query_string(&self, api_key: &str) -> String {
        let pairs = [
            ("country", self.country.clone()),
            ("hotelid", self.hotel_id.clone()),
            ("checkin", self.checkin.format("%Y-%m-%d").to_string()),
            ("checkout", self.checkout.format("%Y-%m-%d").to_string()),
            ("currency", self.currency.clone()),
            ("kids", self.kids.to_string()),
            ("adults", self.adults.to_string()),
            ("rooms", self.rooms.to_string()),
            ("api_key", api_key.to_string()),
        ];
        pairs
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Raw booking search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingResponse(pub Value);

/// Client for the booking search endpoint
#[derive(Clone)]
pub struct BookingClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl BookingClient {
    pub fn new(client: Client, config: &BookingConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| YatraError::config("Booking API key is not configured"))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_config(providers: &ProvidersConfig, booking: &BookingConfig) -> Result<Self> {
        Self::new(build_http_client(providers)?, booking)
    }

    /// Request URL including the credential
    #[must_use]
    pub fn booking_url(&self, request: &BookingRequest) -> String {
        format!("{}/booking?{}", self.base_url, request.query_string(&self.api_key))
    }

    #[instrument(skip(self, request), fields(hotel = %request.hotel_id, country = %request.country))]
    pub async fn get_booking(&self, request: &BookingRequest) -> Result<BookingResponse> {
        request.validate()?;

        let response = self.client.get(self.booking_url(request)).send().await?;
        let response = ensure_success("Booking API", response).await?;
        let body: Value = response.json().await?;

        info!("Booking lookup for hotel {} succeeded", request.hotel_id);
        Ok(BookingResponse(body))
    }
}
