use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use weathervane::api::AppState;
use weathervane::config::WeathervaneConfig;
use weathervane::history::HistoryStore;
use weathervane::openweather::OpenWeatherClient;
use weathervane::service::WeatherService;
use weathervane::web;

#[tokio::main]
async fn main() -> Result<()> {
    let config = WeathervaneConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    match &config.weather.api_key {
        Some(key) => {
            let prefix: String = key.chars().take(4).collect();
            info!("OpenWeather API key configured (first 4 chars: {prefix}...)");
            info!("Note: new API keys may take up to 2 hours to activate");
        }
        None => {
            warn!(
                "No OpenWeather API key configured; lookups will fail or fall back to mock data"
            );
        }
    }

    let client = OpenWeatherClient::new(config.weather.clone())?;
    let state = AppState {
        service: Arc::new(WeatherService::new(client)),
        history: Arc::new(HistoryStore::new(&config.history.file_path)),
    };

    web::run(state, config.server.port).await
}
