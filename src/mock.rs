//! Deterministic placeholder data
//!
//! Everything here is a pure function of the trip request and region, so the
//! same request always produces the same mock itinerary.

use crate::config::RegionConfig;
use crate::models::{
    AccommodationOption, AttractionInfo, Budget, Itinerary, TripRequest, WeatherInfo, city_name,
};

const SUNNY_ICON: &str = "https://cdn.weatherapi.com/weather/64x64/day/113.png";

const STAY_IMAGES: [&str; 3] = [
    "https://images.unsplash.com/photo-1566073771259-6a8506099945?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=60",
    "https://images.unsplash.com/photo-1520277739336-7bf67edfa768?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=60",
    "https://images.unsplash.com/photo-1555854877-bab0e564b8d5?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=60",
];

/// Five activity suggestions for a tier, each mentioning `place`
#[must_use]
pub fn activity_template(budget: Budget, place: &str) -> [String; 5] {
    match budget {
        Budget::Cheap => [
            format!("Free walking tour of {place}"),
            format!("Visit public parks and gardens in {place}"),
            format!("Explore local markets in {place}"),
            format!("Temple visits around {place}"),
            format!("Street food tasting in {place}"),
        ],
        Budget::Moderate => [
            format!("Guided tour of {place}'s main attractions"),
            format!("Visit popular museums and historical sites in {place}"),
            format!("Try local cuisine at mid-range restaurants in {place}"),
            format!("Day trip to nearby attractions from {place}"),
            format!("Cultural shows or performances in {place}"),
        ],
        Budget::Luxury => [
            format!("Private guided tour of {place}"),
            format!("Fine dining experiences at top-rated restaurants in {place}"),
            format!("Luxury spa treatments in {place}"),
            format!("Private tours of historical sites in {place}"),
            format!("VIP access to exclusive attractions in {place}"),
        ],
    }
}

/// First `min(days + 2, 5)` template entries, in order
#[must_use]
pub fn activities(budget: Budget, place: &str, days: u32) -> Vec<String> {
    let template = activity_template(budget, place);
    let count = usize::try_from(days.saturating_add(2))
        .unwrap_or(usize::MAX)
        .min(template.len());
    template.into_iter().take(count).collect()
}

#[must_use]
pub fn mock_weather() -> WeatherInfo {
    WeatherInfo {
        temperature_celsius: 28.0,
        condition: "Sunny".to_string(),
        icon_ref: SUNNY_ICON.to_string(),
        is_synthetic: true,
    }
}

#[must_use]
pub fn mock_accommodations(request: &TripRequest, region: &RegionConfig) -> Vec<AccommodationOption> {
    let city = city_name(&request.destination, &region.country_name);
    let prices: [u32; 3] = match request.budget {
        Budget::Cheap => [800, 1000, 1200],
        Budget::Moderate => [1500, 2000, 2500],
        Budget::Luxury => [3000, 4000, 5000],
    };
    let stays = [
        (format!("{city} Heritage Stay"), 4.2),
        (format!("{city} Palace Hotel"), 4.5),
        (format!("{city} Traveller's Inn"), 4.3),
    ];

    stays
        .into_iter()
        .zip(prices)
        .zip(STAY_IMAGES)
        .map(|(((name, rating), price), image)| AccommodationOption {
            name,
            rating,
            price,
            currency: region.currency.clone(),
            image_ref: image.to_string(),
            is_synthetic: true,
        })
        .collect()
}

#[must_use]
pub fn mock_attractions(request: &TripRequest, region: &RegionConfig) -> Vec<AttractionInfo> {
    let city = city_name(&request.destination, &region.country_name);
    let country = &region.country_name;

    vec![
        AttractionInfo {
            name: format!("{city} Heritage Museum"),
            description: format!(
                "Learn about the rich history of {city} and its cultural significance in {country}"
            ),
            rating: 4.6,
            is_synthetic: true,
        },
        AttractionInfo {
            name: format!("{city} Temple Complex"),
            description: format!(
                "Experience the spiritual traditions in {city}, one of {country}'s most sacred sites"
            ),
            rating: 4.8,
            is_synthetic: true,
        },
        AttractionInfo {
            name: format!("{city} Cultural Center"),
            description: format!(
                "Experience the local culture and traditions of {city}, showcasing {country}'s diverse heritage"
            ),
            rating: 4.4,
            is_synthetic: true,
        },
    ]
}

/// Fully synthetic itinerary; activities name the bare city
#[must_use]
pub fn mock_itinerary(request: &TripRequest, region: &RegionConfig) -> Itinerary {
    let city = city_name(&request.destination, &region.country_name);

    Itinerary {
        destination: request.destination.clone(),
        days: request.days,
        budget: request.budget,
        travelers: request.travelers,
        activities: activities(request.budget, &city, request.days),
        accommodations: Some(mock_accommodations(request, region)),
        attractions: Some(mock_attractions(request, region)),
        weather: Some(mock_weather()),
    }
}
