//! `weathervane` - City weather forecast service with search history
//!
//! This library resolves free-text city names to coordinates, fetches a
//! multi-day forecast from the OpenWeather API, shapes it into a compact
//! per-day list, and persists a deduplicated history of searched cities.

pub mod api;
pub mod config;
pub mod error;
pub mod forecast;
pub mod history;
pub mod models;
pub mod openweather;
pub mod service;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::WeathervaneConfig;
pub use error::WeathervaneError;
pub use history::HistoryStore;
pub use models::{Coordinates, ForecastEntry, HistoryEntry, RawSample};
pub use openweather::OpenWeatherClient;
pub use service::WeatherService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeathervaneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
