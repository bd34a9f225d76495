//! OpenWeather API clients
//!
//! HTTP wrappers for the OpenWeather geocoding and 5-day forecast
//! endpoints. Both require an API credential; a rejected credential is
//! surfaced as a distinct error kind so the lookup path can fall back to
//! synthetic data. Requests are attempted at most once, with no retries.

use std::time::Duration;

use chrono::{FixedOffset, Offset, Utc};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, error, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::error::WeathervaneError;
use crate::models::{Coordinates, ForecastSeries};

/// Client for the OpenWeather geocoding and forecast endpoints
#[derive(Debug)]
pub struct OpenWeatherClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenWeatherClient {
    /// Create a new client from the weather configuration
    pub fn new(config: WeatherConfig) -> Result<Self, WeathervaneError> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("weathervane/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                WeathervaneError::config(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    fn api_key(&self) -> &str {
        // An absent key is sent as-is; the upstream rejects it with 401,
        // which the lookup path turns into the mock fallback.
        self.config.api_key.as_deref().unwrap_or_default()
    }

    /// Resolve a free-text place name to coordinates.
    ///
    /// Always takes the first candidate the geocoding service returns.
    #[instrument(skip(self))]
    pub async fn geocode(&self, query: &str) -> Result<Coordinates, WeathervaneError> {
        let url = format!(
            "{}?q={}&limit=1&appid={}",
            self.config.geocode_base_url,
            urlencoding::encode(query),
            self.api_key()
        );

        debug!("Geocoding request URL: {}", redact(&url));

        let response = self.get(&url).await?;

        let candidates: Vec<wire::GeoRecord> = response.json().await.map_err(|e| {
            error!("Failed to parse geocoding response for '{query}': {e}");
            WeathervaneError::upstream("Invalid geocoding data received from OpenWeather API")
        })?;

        let Some(first) = candidates.into_iter().next() else {
            warn!("No location found for '{query}'");
            return Err(WeathervaneError::not_found(format!(
                "no location found for: {query}"
            )));
        };

        let coordinates = Coordinates::new(first.lat, first.lon, first.name);
        info!(
            "Resolved '{}' to {} ({})",
            query,
            coordinates.name,
            coordinates.format_coordinates()
        );

        Ok(coordinates)
    }

    /// Fetch the 5-day / 3-hour forecast series for the given coordinates.
    ///
    /// Sample timestamps are shifted into the UTC offset the forecast
    /// endpoint reports for the location.
    #[instrument(skip(self, coordinates), fields(city = %coordinates.name))]
    pub async fn fetch_forecast(
        &self,
        coordinates: &Coordinates,
    ) -> Result<ForecastSeries, WeathervaneError> {
        let url = format!(
            "{}?lat={}&lon={}&units=imperial&appid={}",
            self.config.forecast_base_url,
            coordinates.lat,
            coordinates.lon,
            self.api_key()
        );

        debug!("Forecast request URL: {}", redact(&url));

        let response = self.get(&url).await?;

        let payload: wire::ForecastResponse = response.json().await.map_err(|e| {
            error!("Failed to parse forecast response for '{}': {e}", coordinates.name);
            WeathervaneError::upstream("Invalid forecast data received from OpenWeather API")
        })?;

        if payload.list.is_empty() {
            return Err(WeathervaneError::upstream(
                "forecast response contained no samples",
            ));
        }

        let utc_offset =
            FixedOffset::east_opt(payload.city.timezone).unwrap_or_else(|| Utc.fix());

        let samples = payload
            .list
            .into_iter()
            .map(|item| item.into_sample(utc_offset))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "Retrieved {} forecast samples for {}",
            samples.len(),
            coordinates.name
        );

        Ok(ForecastSeries {
            utc_offset,
            samples,
        })
    }

    /// Issue a GET request and map non-success statuses to error kinds.
    async fn get(&self, url: &str) -> Result<Response, WeathervaneError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Network error calling {}: {e}", redact(url));
            WeathervaneError::upstream(format!("Network error: {e}"))
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            error!("API authentication failed (HTTP 401)");
            return Err(WeathervaneError::unauthorized(
                "Invalid API key. Please check your OpenWeather API key.",
            ));
        }
        if status == StatusCode::NOT_FOUND {
            warn!("Upstream reported not found (HTTP 404)");
            return Err(WeathervaneError::not_found(
                "upstream reported the requested location as not found",
            ));
        }
        if !status.is_success() {
            warn!("HTTP error from upstream: {status}");
            return Err(WeathervaneError::upstream(format!(
                "API request failed with status: {status}"
            )));
        }

        Ok(response)
    }
}

/// Strip the API credential from a URL before logging it
fn redact(url: &str) -> &str {
    url.split("appid=").next().unwrap_or(url)
}

/// OpenWeather API response structures and conversion utilities
mod wire {
    use chrono::{DateTime, FixedOffset};
    use serde::Deserialize;

    use crate::error::WeathervaneError;
    use crate::models::RawSample;

    /// One candidate from the geocoding endpoint
    #[derive(Debug, Deserialize)]
    pub struct GeoRecord {
        pub name: String,
        pub lat: f64,
        pub lon: f64,
    }

    /// Response from the 5-day forecast endpoint
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub list: Vec<ForecastItem>,
        pub city: CityInfo,
    }

    #[derive(Debug, Deserialize)]
    pub struct CityInfo {
        /// Shift in seconds from UTC at the forecast location
        #[serde(default)]
        pub timezone: i32,
    }

    /// One 3-hour-interval reading
    #[derive(Debug, Deserialize)]
    pub struct ForecastItem {
        pub dt: i64,
        pub main: MainReadings,
        pub wind: WindReadings,
        pub weather: Vec<Condition>,
    }

    #[derive(Debug, Deserialize)]
    pub struct MainReadings {
        pub temp: f64,
        pub humidity: u8,
    }

    #[derive(Debug, Deserialize)]
    pub struct WindReadings {
        pub speed: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct Condition {
        pub icon: String,
        pub description: String,
    }

    impl ForecastItem {
        /// Convert to a location-local raw sample
        pub fn into_sample(self, offset: FixedOffset) -> Result<RawSample, WeathervaneError> {
            let timestamp = DateTime::from_timestamp(self.dt, 0)
                .ok_or_else(|| {
                    WeathervaneError::upstream(format!(
                        "forecast sample carried an invalid timestamp: {}",
                        self.dt
                    ))
                })?
                .with_timezone(&offset);

            let condition = self.weather.into_iter().next().ok_or_else(|| {
                WeathervaneError::upstream("forecast sample missing its weather condition")
            })?;

            Ok(RawSample {
                timestamp,
                temp_f: self.main.temp,
                wind_speed: self.wind.speed,
                humidity: self.main.humidity,
                icon: condition.icon,
                description: condition.description,
            })
        }
    }
}
