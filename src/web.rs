use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::api::{self, AppState};
use crate::booking::BookingClient;
use crate::config::YatraConfig;
use crate::itinerary::ItineraryService;
use crate::{Result, YatraError};

/// Assemble handler state from configuration.
///
/// Booking lookup is optional: without an API key the route answers 503.
pub fn app_state(config: &YatraConfig) -> Result<AppState> {
    let itineraries = ItineraryService::from_config(config)?;
    let booking = match BookingClient::from_config(&config.providers, &config.booking) {
        Ok(client) => Some(client),
        Err(e) => {
            warn!("Booking lookup disabled: {}", e);
            None
        }
    };
    Ok(AppState::new(itineraries, booking, config.map.clone()))
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router(state))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
}

pub async fn run(config: &YatraConfig, port: u16) -> Result<()> {
    let app = app(app_state(config)?);

    let addr = format!("{}:{}", config.server.host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| YatraError::general(format!("Web server stopped: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping web server");
}
