//! Weather lookup orchestration
//!
//! Resolves a city name to coordinates, fetches the raw forecast series,
//! and shapes it into the compact forecast list. A credential rejection
//! from either upstream call is the one locally recovered failure: the
//! service substitutes a synthetic forecast so a freshly issued API key
//! that has not activated yet does not take the whole endpoint down.

use chrono::{Local, Utc};
use tracing::{error, instrument, warn};

use crate::error::WeathervaneError;
use crate::forecast::{build_forecast, mock_forecast};
use crate::models::ForecastEntry;
use crate::openweather::OpenWeatherClient;

/// Orchestrates geocoding, forecast retrieval, and forecast shaping
#[derive(Debug)]
pub struct WeatherService {
    client: OpenWeatherClient,
}

impl WeatherService {
    /// Create a service around the given upstream client
    #[must_use]
    pub fn new(client: OpenWeatherClient) -> Self {
        Self { client }
    }

    /// Look up the forecast for a city name.
    ///
    /// On an upstream credential rejection the result is a synthetic
    /// forecast carrying the user-supplied name; every other failure
    /// propagates unchanged. No retries.
    #[instrument(skip(self))]
    pub async fn weather_for_city(
        &self,
        city: &str,
    ) -> Result<Vec<ForecastEntry>, WeathervaneError> {
        match self.live_forecast(city).await {
            Ok(entries) => Ok(entries),
            Err(err) if err.is_unauthorized() => {
                warn!("Upstream rejected the API key, serving mock data for '{city}'");
                Ok(mock_forecast(city, Local::now().date_naive()))
            }
            Err(err) => {
                error!("Weather lookup for '{city}' failed: {err}");
                Err(err)
            }
        }
    }

    async fn live_forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, WeathervaneError> {
        let coordinates = self.client.geocode(city).await?;
        let series = self.client.fetch_forecast(&coordinates).await?;
        let reference_date = series.local_today(Utc::now());
        build_forecast(&series.samples, &coordinates.name, reference_date)
    }
}
