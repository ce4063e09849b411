mod alerts;
mod config;
mod db;
mod geocoding;
mod http;
mod models;
mod realtime;
mod state;

use alerts::generator::AlertGenerator;
use anyhow::Context;
use config::AppConfig;
use geocoding::NominatimGeocoder;
use state::AppState;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config
    let config = AppConfig::load()?;

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .init();

    info!("Starting CityPulse backend...");

    let geocoder = NominatimGeocoder::new(&config)?;
    let state = AppState::new(Arc::new(geocoder));

    // Synthetic alerts run for the life of the process.
    let _generator = AlertGenerator::new(
        state.alerts.clone(),
        state.broadcaster.clone(),
        Duration::from_secs(config.alert_interval_secs),
        config.alert_probability,
    )
    .spawn();

    let app = http::router(state, &config.frontend_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .context("failed to bind server port")?;
    info!("Listening on http://{}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
