//! Itinerary aggregation
//!
//! Launches the weather, accommodation and attraction providers with a fixed
//! stagger, races each against its deadline in launch order, and merges the
//! results with mock data for anything that failed.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::OnceCell;
use tracing::{info, instrument, warn};

use crate::config::{PipelineConfig, RegionConfig, YatraConfig};
use crate::mock;
use crate::models::{GeoPoint, Itinerary, TripRequest};
use crate::providers::{
    AccommodationSource, AttractionSource, Geocoder, NominatimGeocoder, OpenMeteoWeather,
    OverpassAccommodations, OverpassAttractions, OverpassClient, ProviderOutcome, WeatherSource,
    build_http_client,
};
use crate::race::InFlight;
use crate::Result;

/// Where a merged field came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Live,
    Mock,
}

impl Source {
    fn as_str(self) -> &'static str {
        match self {
            Source::Live => "live",
            Source::Mock => "mock",
        }
    }
}

/// Adopt live data or fall back to the mock value
fn merge<T>(label: &str, outcome: ProviderOutcome<T>, fallback: impl FnOnce() -> T) -> (T, Source) {
    match outcome {
        ProviderOutcome::Data(data) => (data, Source::Live),
        ProviderOutcome::Empty => {
            info!("{} provider returned nothing usable, using mock data", label);
            (fallback(), Source::Mock)
        }
        ProviderOutcome::Failed(reason) => {
            warn!("{} provider failed ({}), using mock data", label, reason);
            (fallback(), Source::Mock)
        }
    }
}

/// List outcomes count as live only when they carry at least one entry
fn merge_list<T>(
    label: &str,
    outcome: ProviderOutcome<Vec<T>>,
    fallback: impl FnOnce() -> Vec<T>,
) -> (Vec<T>, Source) {
    match outcome {
        ProviderOutcome::Data(items) if items.is_empty() => {
            merge(label, ProviderOutcome::Empty, fallback)
        }
        other => merge(label, other, fallback),
    }
}

/// Destination coordinates shared by the provider tasks of one invocation
#[derive(Clone)]
struct SharedLocation {
    geocoder: Arc<dyn Geocoder>,
    destination: Arc<str>,
    cell: Arc<OnceCell<GeoPoint>>,
}

impl SharedLocation {
    fn new(geocoder: Arc<dyn Geocoder>, destination: &str) -> Self {
        Self {
            geocoder,
            destination: Arc::from(destination),
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// Resolve once; a failed resolution is left for the next caller to retry
    async fn resolve(&self) -> Result<GeoPoint> {
        let point = self
            .cell
            .get_or_try_init(|| self.geocoder.geocode(&self.destination))
            .await?;
        Ok(*point)
    }
}

/// Builds itineraries from live providers with mock fallback
#[derive(Clone)]
pub struct ItineraryService {
    geocoder: Arc<dyn Geocoder>,
    weather: Arc<dyn WeatherSource>,
    accommodations: Arc<dyn AccommodationSource>,
    attractions: Arc<dyn AttractionSource>,
    region: RegionConfig,
    pipeline: PipelineConfig,
}

impl ItineraryService {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        weather: Arc<dyn WeatherSource>,
        accommodations: Arc<dyn AccommodationSource>,
        attractions: Arc<dyn AttractionSource>,
        region: RegionConfig,
        pipeline: PipelineConfig,
    ) -> Self {
        Self {
            geocoder,
            weather,
            accommodations,
            attractions,
            region,
            pipeline,
        }
    }

    /// Wire the Nominatim, Open-Meteo and Overpass adapters from configuration
    pub fn from_config(config: &YatraConfig) -> Result<Self> {
        let client = build_http_client(&config.providers)?;
        let overpass = OverpassClient::new(client.clone(), &config.providers);

        Ok(Self::new(
            Arc::new(NominatimGeocoder::new(client.clone(), &config.providers, &config.region)),
            Arc::new(OpenMeteoWeather::new(client, &config.providers)),
            Arc::new(OverpassAccommodations::new(
                overpass.clone(),
                config.region.clone(),
                config.pipeline.max_results,
            )),
            Arc::new(OverpassAttractions::new(
                overpass,
                config.region.clone(),
                config.pipeline.attraction_radius_m,
                config.pipeline.max_results,
            )),
            config.region.clone(),
            config.pipeline.clone(),
        ))
    }

    #[must_use]
    pub fn region(&self) -> &RegionConfig {
        &self.region
    }

    /// Build an itinerary for `request`.
    ///
    /// Never fails: provider failures, timeouts and internal faults all degrade
    /// to mock data, visible only through the `is_synthetic` flags.
    #[instrument(skip(self, request), fields(destination = %request.destination, days = request.days, budget = %request.budget))]
    pub async fn get_itinerary(&self, request: TripRequest) -> Itinerary {
        let request = request.normalized(&self.region.country_name);

        match AssertUnwindSafe(self.assemble(&request)).catch_unwind().await {
            Ok(itinerary) => itinerary,
            Err(_) => {
                warn!("Itinerary assembly panicked, returning mock itinerary");
                mock::mock_itinerary(&request, &self.region)
            }
        }
    }

    async fn assemble(&self, request: &TripRequest) -> Itinerary {
        let activities = mock::activities(request.budget, &request.destination, request.days);
        let location = SharedLocation::new(Arc::clone(&self.geocoder), &request.destination);
        let stagger = self.pipeline.stagger();

        let weather = {
            let location = location.clone();
            let source = Arc::clone(&self.weather);
            InFlight::launch("weather", async move {
                match location.resolve().await {
                    Ok(point) => source.current_weather(point).await,
                    Err(e) => ProviderOutcome::failed(e),
                }
            })
        };

        tokio::time::sleep(stagger).await;
        let accommodations = {
            let location = location.clone();
            let source = Arc::clone(&self.accommodations);
            let budget = request.budget;
            let destination = request.destination.clone();
            InFlight::launch("accommodation", async move {
                match location.resolve().await {
                    Ok(point) => source.accommodations(point, budget, &destination).await,
                    Err(e) => ProviderOutcome::failed(e),
                }
            })
        };

        tokio::time::sleep(stagger).await;
        let attractions = {
            let source = Arc::clone(&self.attractions);
            let destination = request.destination.clone();
            InFlight::launch("attractions", async move {
                match location.resolve().await {
                    Ok(point) => source.attractions(point, &destination).await,
                    Err(e) => ProviderOutcome::failed(e),
                }
            })
        };

        let deadline = self.pipeline.provider_timeout();
        let (weather, weather_source) =
            merge("weather", weather.race(deadline).await, mock::mock_weather);
        let (accommodations, accommodation_source) = merge_list(
            "accommodation",
            accommodations.race(deadline).await,
            || mock::mock_accommodations(request, &self.region),
        );
        let (attractions, attraction_source) = merge_list(
            "attractions",
            attractions.race(deadline).await,
            || mock::mock_attractions(request, &self.region),
        );

        info!(
            weather = weather_source.as_str(),
            accommodations = accommodation_source.as_str(),
            attractions = attraction_source.as_str(),
            "Assembled itinerary for {}",
            request.destination
        );

        debug_assert!(!activities.is_empty());

        Itinerary {
            destination: request.destination.clone(),
            days: request.days,
            budget: request.budget,
            travelers: request.travelers,
            activities,
            accommodations: Some(accommodations),
            attractions: Some(attractions),
            weather: Some(weather),
        }
    }
}
