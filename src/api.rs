//! JSON API consumed by the web front end

use std::sync::Arc;

use axum::{
    Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde_json::json;
use tracing::warn;

use crate::YatraError;
use crate::booking::{BookingClient, BookingRequest, BookingResponse};
use crate::config::MapConfig;
use crate::itinerary::ItineraryService;
use crate::models::{Itinerary, TripRequest};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub itineraries: ItineraryService,
    /// `None` when no booking API key is configured
    pub booking: Option<BookingClient>,
    pub map: Arc<MapConfig>,
}

impl AppState {
    pub fn new(itineraries: ItineraryService, booking: Option<BookingClient>, map: MapConfig) -> Self {
        Self {
            itineraries,
            booking,
            map: Arc::new(map),
        }
    }
}

/// Error body `{ "error": message }` with a status derived from the error kind
pub struct ApiError(YatraError);

impl From<YatraError> for ApiError {
    fn from(err: YatraError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            YatraError::Validation { .. } => StatusCode::BAD_REQUEST,
            YatraError::LocationNotFound { .. } => StatusCode::NOT_FOUND,
            YatraError::Api { .. } => StatusCode::BAD_GATEWAY,
            YatraError::Config { .. } => StatusCode::SERVICE_UNAVAILABLE,
            YatraError::Io { .. } | YatraError::General { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!("Request failed with {}: {}", status, self.0);
        }
        (status, Json(json!({ "error": self.0.user_message() }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/itinerary", post(plan_itinerary))
        .route("/booking", get(get_booking))
        .route("/map-config", get(get_map_config))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn plan_itinerary(
    State(state): State<AppState>,
    payload: Result<Json<TripRequest>, JsonRejection>,
) -> Result<Json<Itinerary>, ApiError> {
    let Json(request) = payload.map_err(|e| YatraError::validation(e.body_text()))?;
    request.validate()?;
    Ok(Json(state.itineraries.get_itinerary(request).await))
}

async fn get_booking(
    State(state): State<AppState>,
    params: Result<Query<BookingRequest>, QueryRejection>,
) -> Result<Json<BookingResponse>, ApiError> {
    let Query(request) = params.map_err(|e| YatraError::validation(e.body_text()))?;
    request.validate()?;

    let client = state
        .booking
        .as_ref()
        .ok_or_else(|| YatraError::config("Booking lookup is not configured"))?;
    Ok(Json(client.get_booking(&request).await?))
}

async fn get_map_config(State(state): State<AppState>) -> Json<MapConfig> {
    Json(state.map.as_ref().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BookingConfig, PipelineConfig, RegionConfig};
    use crate::models::{
        AccommodationOption, AttractionInfo, Budget, GeoPoint, WeatherInfo,
    };
    use crate::providers::{
        AccommodationSource, AttractionSource, Geocoder, ProviderOutcome, WeatherSource,
    };
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use serde_json::Value;
    use tower::ServiceExt;

    /// Every lookup fails immediately, so the service answers with mock data
    struct Offline;

    #[async_trait]
    impl Geocoder for Offline {
        async fn geocode(&self, query: &str) -> crate::Result<GeoPoint> {
            Err(YatraError::location_not_found(query))
        }
    }

    #[async_trait]
    impl WeatherSource for Offline {
        async fn current_weather(&self, _point: GeoPoint) -> ProviderOutcome<WeatherInfo> {
            ProviderOutcome::Empty
        }
    }

    #[async_trait]
    impl AccommodationSource for Offline {
        async fn accommodations(
            &self,
            _point: GeoPoint,
            _budget: Budget,
            _destination: &str,
        ) -> ProviderOutcome<Vec<AccommodationOption>> {
            ProviderOutcome::Empty
        }
    }

    #[async_trait]
    impl AttractionSource for Offline {
        async fn attractions(
            &self,
            _point: GeoPoint,
            _destination: &str,
        ) -> ProviderOutcome<Vec<AttractionInfo>> {
            ProviderOutcome::Empty
        }
    }

    fn app(booking: Option<BookingClient>) -> Router {
        let offline = Arc::new(Offline);
        let pipeline = PipelineConfig {
            stagger_ms: 0,
            ..PipelineConfig::default()
        };
        let service = ItineraryService::new(
            offline.clone(),
            offline.clone(),
            offline.clone(),
            offline,
            RegionConfig::default(),
            pipeline,
        );
        router(AppState::new(service, booking, MapConfig::default()))
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_itinerary(body: &str) -> Request<Body> {
        Request::post("/itinerary")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(None)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn test_itinerary_falls_back_to_mock_data() {
        let response = app(None)
            .oneshot(post_itinerary(
                r#"{"destination":"Goa","days":2,"budget":"cheap","travelers":"family"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["destination"], "Goa, India");
        assert_eq!(body["activities"].as_array().map(Vec::len), Some(4));
        assert_eq!(body["weather"]["isSynthetic"], true);
        assert_eq!(body["accommodations"][0]["name"], "Goa Heritage Stay");
        assert_eq!(body["accommodations"][0]["price"], 800);
    }

    #[tokio::test]
    async fn test_unknown_budget_defaults_to_moderate() {
        let response = app(None)
            .oneshot(post_itinerary(
                r#"{"destination":"Jaipur","days":1,"budget":"lavish","travelers":"solo"}"#,
            ))
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["budget"], "moderate");
        assert_eq!(body["accommodations"][0]["price"], 1500);
    }

    #[tokio::test]
    async fn test_zero_day_trip_is_rejected() {
        let response = app(None)
            .oneshot(post_itinerary(
                r#"{"destination":"Jaipur","days":0,"budget":"cheap","travelers":"solo"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("at least 1 day"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let response = app(None)
            .oneshot(post_itinerary(r#"{"destination":"Jaipur","days":2,"travelers":"crowd"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_booking_without_key_is_unavailable() {
        let uri = "/booking?country=in&hotelid=1&checkin=2026-11-01&checkout=2026-11-02";
        let response = app(None)
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_booking_with_reversed_dates_is_rejected() {
        let config = BookingConfig {
            api_key: Some("key".to_string()),
            ..BookingConfig::default()
        };
        let client = BookingClient::new(reqwest::Client::new(), &config).unwrap();
        let uri = "/booking?country=in&hotelid=1&checkin=2026-11-05&checkout=2026-11-02";
        let response = app(Some(client))
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_map_config() {
        let response = app(None)
            .oneshot(Request::get("/map-config").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["zoom"], 4.0);
        assert_eq!(body["center"][0], 22.5937);
        assert!(body["accessToken"].is_null());
    }
}
