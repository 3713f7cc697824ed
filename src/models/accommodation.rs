//! Accommodation option shown with an itinerary

use serde::{Deserialize, Serialize};

/// A place to stay near the destination
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationOption {
    pub name: String,
    /// Rating on a 0-5 scale
    pub rating: f64,
    /// Nightly price in whole currency units
    pub price: u32,
    /// ISO 4217 currency code
    pub currency: String,
    pub image_ref: String,
    /// True when generated locally instead of fetched
    pub is_synthetic: bool,
}

impl AccommodationOption {
    /// Format price with currency, e.g. "INR 1500"
    #[must_use]
    pub fn format_price(&self) -> String {
        format!("{} {}", self.currency, self.price)
    }
}
