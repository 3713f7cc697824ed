//! Attraction shown with an itinerary

use serde::{Deserialize, Serialize};

/// A point of interest near the destination
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttractionInfo {
    pub name: String,
    pub description: String,
    pub rating: f64,
    /// True when generated locally instead of fetched
    pub is_synthetic: bool,
}
