//! Data models for Yatra
//!
//! This module contains the pipeline's input and output types organized by concern:
//! - Trip: the request and its budget/party enums
//! - Location: resolved coordinates
//! - Weather, Accommodation, Attraction: per-provider records
//! - Itinerary: the assembled result

pub mod accommodation;
pub mod attraction;
pub mod itinerary;
pub mod location;
pub mod trip;
pub mod weather;

// Re-export all public types for convenient access
pub use accommodation::AccommodationOption;
pub use attraction::AttractionInfo;
pub use itinerary::Itinerary;
pub use location::GeoPoint;
pub use trip::{Budget, TripRequest, Travelers, city_name, normalize_destination};
pub use weather::{WeatherIcon, WeatherInfo, weather_code_to_condition};
