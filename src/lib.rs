//! `Yatra` - travel itinerary planning from live providers with mock fallback
//!
//! This library geocodes a destination, gathers weather, accommodations and
//! attractions from third-party services, and merges them into an itinerary.
//! Any provider that fails or misses its deadline is replaced by deterministic
//! mock data.

pub mod api;
pub mod booking;
pub mod config;
pub mod error;
pub mod itinerary;
pub mod logging;
pub mod mock;
pub mod models;
pub mod providers;
pub mod race;
pub mod web;

// Re-export core types for public API
pub use booking::{BookingClient, BookingRequest, BookingResponse};
pub use config::YatraConfig;
pub use error::YatraError;
pub use itinerary::ItineraryService;
pub use models::{Itinerary, TripRequest};
pub use providers::ProviderOutcome;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, YatraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
