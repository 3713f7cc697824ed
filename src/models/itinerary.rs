//! Itinerary returned by the aggregation pipeline

use serde::{Deserialize, Serialize};

use super::{AccommodationOption, AttractionInfo, Budget, Travelers, WeatherInfo};

/// Assembled trip plan; owned by the caller once returned
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    /// Normalized destination
    pub destination: String,
    pub days: u32,
    pub budget: Budget,
    pub travelers: Travelers,
    /// Suggested activities in order
    pub activities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accommodations: Option<Vec<AccommodationOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attractions: Option<Vec<AttractionInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherInfo>,
}

impl Itinerary {
    /// True when every present optional field came from a live provider
    #[must_use]
    pub fn is_fully_live(&self) -> bool {
        let weather_live = self.weather.as_ref().is_none_or(|w| !w.is_synthetic);
        let stays_live = self
            .accommodations
            .as_ref()
            .is_none_or(|list| list.iter().all(|a| !a.is_synthetic));
        let sights_live = self
            .attractions
            .as_ref()
            .is_none_or(|list| list.iter().all(|a| !a.is_synthetic));
        weather_live && stays_live && sights_live
    }
}
