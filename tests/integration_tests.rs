//! End-to-end tests for the itinerary pipeline and booking lookup against
//! mocked Nominatim, Open-Meteo, Overpass and Makcorps servers.

use httpmock::prelude::*;
use serde_json::json;
use yatra::config::YatraConfig;
use yatra::models::{Budget, Travelers, TripRequest, WeatherIcon};
use yatra::{BookingClient, BookingRequest, ItineraryService, YatraError, mock};

fn config_for(server: &MockServer) -> YatraConfig {
    let mut config = YatraConfig::default();
    config.providers.geocoding_url = server.base_url();
    config.providers.weather_url = server.base_url();
    config.providers.overpass_url = server.base_url();
    config.providers.http_timeout_seconds = 5;
    config.pipeline.stagger_ms = 0;
    config.booking.base_url = server.base_url();
    config.booking.api_key = Some("test-key".to_string());
    config
}

fn jaipur() -> TripRequest {
    TripRequest::new("Jaipur", 3, Budget::Cheap, Travelers::Couple)
}

async fn mock_geocoder(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/search")
                .query_param("q", "Jaipur, India")
                .query_param("countrycodes", "in")
                .header("accept-language", "en");
            then.status(200).json_body(json!([
                { "lat": "26.9124", "lon": "75.7873", "display_name": "Jaipur, Rajasthan, India" }
            ]));
        })
        .await
}

async fn mock_weather(server: &MockServer, code: u16) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/forecast")
                .query_param("current", "temperature_2m,weather_code");
            then.status(200).json_body(json!({
                "latitude": 26.9,
                "longitude": 75.8,
                "current": { "time": "2026-10-16T12:00", "temperature_2m": 31.4, "weather_code": code }
            }));
        })
        .await
}

async fn mock_hotels(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/interpreter")
                .body_contains("guest_house");
            then.status(200).json_body(json!({
                "elements": [
                    { "type": "node", "id": 1, "lat": 26.92, "lon": 75.82,
                      "tags": { "name": "Hotel Pearl Palace", "tourism": "hotel", "stars": "3" } },
                    { "type": "node", "id": 2, "lat": 26.91, "lon": 75.80,
                      "tags": { "tourism": "hostel" } },
                    { "type": "node", "id": 3, "lat": 26.90, "lon": 75.79,
                      "tags": { "name": "Zostel Jaipur", "tourism": "hostel" } }
                ]
            }));
        })
        .await
}

async fn mock_sights(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/interpreter")
                .body_contains("place_of_worship");
            then.status(200).json_body(json!({
                "elements": [
                    { "type": "node", "id": 10, "lat": 26.92, "lon": 75.82,
                      "tags": { "name": "Hawa Mahal", "historic": "palace" } },
                    { "type": "node", "id": 11, "lat": 26.98, "lon": 75.85,
                      "tags": { "name": "Albert Hall Museum", "tourism": "museum" } }
                ]
            }));
        })
        .await
}

#[tokio::test]
async fn test_live_itinerary_from_all_providers() {
    let server = MockServer::start_async().await;
    let geocoder = mock_geocoder(&server).await;
    mock_weather(&server, 2).await;
    mock_hotels(&server).await;
    mock_sights(&server).await;

    let service = ItineraryService::from_config(&config_for(&server)).unwrap();
    let itinerary = service.get_itinerary(jaipur()).await;

    assert_eq!(itinerary.destination, "Jaipur, India");
    assert_eq!(itinerary.activities.len(), 5);
    assert!(itinerary.is_fully_live());

    let weather = itinerary.weather.unwrap();
    assert_eq!(weather.temperature_celsius, 31.4);
    assert_eq!(weather.condition, "Partly cloudy");
    assert!(!weather.is_synthetic);

    let stays = itinerary.accommodations.unwrap();
    assert_eq!(stays.len(), 2);
    assert_eq!(stays[0].name, "Hotel Pearl Palace");
    assert_eq!(stays[0].rating, 3.0);
    // cheap tier, 3 stars: 1500 * 1.5 +/- 250
    assert!((2000..=2500).contains(&stays[0].price));
    assert_eq!(stays[1].name, "Zostel Jaipur");
    assert!((3.5..=5.0).contains(&stays[1].rating));

    let sights = itinerary.attractions.unwrap();
    assert_eq!(sights[0].name, "Hawa Mahal");
    assert_eq!(
        sights[0].description,
        "Historic palace in Jaipur, India, showcasing India's rich heritage."
    );
    assert!(sights.iter().all(|s| (4.0..=5.0).contains(&s.rating)));

    // One shared geocode per invocation
    assert_eq!(geocoder.hits_async().await, 1);
}

#[tokio::test]
async fn test_thunderstorm_code_maps_to_thunder_icon() {
    let server = MockServer::start_async().await;
    mock_geocoder(&server).await;
    mock_weather(&server, 95).await;
    mock_hotels(&server).await;
    mock_sights(&server).await;

    let service = ItineraryService::from_config(&config_for(&server)).unwrap();
    let weather = service.get_itinerary(jaipur()).await.weather.unwrap();

    assert_eq!(weather.condition, "Thunderstorm");
    assert_eq!(weather.icon_ref, WeatherIcon::Thunder.url());
}

#[tokio::test]
async fn test_overpass_failure_only_replaces_accommodations() {
    let server = MockServer::start_async().await;
    mock_geocoder(&server).await;
    mock_weather(&server, 0).await;
    mock_sights(&server).await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/interpreter")
                .body_contains("guest_house");
            then.status(500).body("rate limited");
        })
        .await;

    let config = config_for(&server);
    let service = ItineraryService::from_config(&config).unwrap();
    let request = jaipur();
    let itinerary = service.get_itinerary(request.clone()).await;

    let normalized = request.normalized(&config.region.country_name);
    assert_eq!(
        itinerary.accommodations,
        Some(mock::mock_accommodations(&normalized, &config.region))
    );
    assert!(itinerary.weather.is_some_and(|w| !w.is_synthetic));
    assert!(itinerary.attractions.unwrap().iter().all(|a| !a.is_synthetic));
}

#[tokio::test]
async fn test_unknown_destination_yields_mock_data() {
    let server = MockServer::start_async().await;
    let geocoder = server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(200).json_body(json!([]));
        })
        .await;
    let weather = mock_weather(&server, 0).await;

    let config = config_for(&server);
    let service = ItineraryService::from_config(&config).unwrap();
    let request = TripRequest::new("Atlantis", 2, Budget::Luxury, Travelers::Solo);
    let itinerary = service.get_itinerary(request.clone()).await;

    let expected = mock::mock_itinerary(&request.normalized("India"), &config.region);
    assert_eq!(itinerary.weather, expected.weather);
    assert_eq!(itinerary.accommodations, expected.accommodations);
    assert_eq!(itinerary.attractions, expected.attractions);
    assert_eq!(itinerary.activities.len(), 4);
    assert_eq!(itinerary.activities[0], "Private guided tour of Atlantis, India");

    // Failed lookups are retried by each provider, and no provider is reached
    assert_eq!(geocoder.hits_async().await, 3);
    assert_eq!(weather.hits_async().await, 0);
}

fn booking_request() -> BookingRequest {
    serde_json::from_value(json!({
        "country": "us",
        "hotelid": "4232686",
        "checkin": "2026-12-10",
        "checkout": "2026-12-12",
        "adults": 2
    }))
    .unwrap()
}

#[tokio::test]
async fn test_booking_body_is_passed_through() {
    let server = MockServer::start_async().await;
    let body = json!({ "comparison": [[{ "vendor1": "Booking.com", "price1": "$240" }]] });
    let lookup = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/booking")
                .query_param("hotelid", "4232686")
                .query_param("adults", "2")
                .query_param("rooms", "1")
                .query_param("api_key", "test-key");
            then.status(200).json_body(body.clone());
        })
        .await;

    let config = config_for(&server);
    let client = BookingClient::from_config(&config.providers, &config.booking).unwrap();
    let response = client.get_booking(&booking_request()).await.unwrap();

    assert_eq!(response.0, body);
    lookup.assert_async().await;
}

#[tokio::test]
async fn test_booking_error_status_is_reported() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/booking");
            then.status(401).json_body(json!({ "message": "invalid api key" }));
        })
        .await;

    let config = config_for(&server);
    let client = BookingClient::from_config(&config.providers, &config.booking).unwrap();
    let result = client.get_booking(&booking_request()).await;

    match result {
        Err(YatraError::Api { message }) => assert!(message.contains("401")),
        other => panic!("expected API error, got {other:?}"),
    }
}
