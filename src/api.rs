//! HTTP API surface
//!
//! Routes, handlers, and the mapping from service errors to HTTP status
//! codes. Validation failures map to 400 and an escaped credential
//! rejection to 401; not-found and upstream failures are not distinguished
//! at this boundary and surface as 500.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::error::WeathervaneError;
use crate::history::HistoryStore;
use crate::models::{ForecastEntry, HistoryEntry};
use crate::service::WeatherService;

/// Shared per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Weather lookup orchestration
    pub service: Arc<WeatherService>,
    /// Search history store
    pub history: Arc<HistoryStore>,
}

/// Error returned from API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<WeathervaneError> for ApiError {
    fn from(err: WeathervaneError) -> Self {
        match err {
            WeathervaneError::Validation { message } => Self::BadRequest(message),
            WeathervaneError::Unauthorized { .. } => Self::Unauthorized(
                "API key is unauthorized. New API keys take up to 2 hours to activate."
                    .to_string(),
            ),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Body of `POST /api/weather`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRequest {
    /// Free-text city name to look up
    #[serde(default)]
    pub city_name: String,
}

/// Body of a successful history removal
#[derive(Debug, Serialize)]
pub struct RemovalResponse {
    /// Confirmation message
    pub message: String,
}

/// Build the API router over the given state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/weather", post(get_weather))
        .route("/api/weather/history", get(list_history))
        .route("/api/weather/history/", delete(remove_history_missing_id))
        .route("/api/weather/history/{id}", delete(remove_history))
        .with_state(state)
}

/// `POST /api/weather`: resolve a city and return its forecast list,
/// recording the resolved city in the search history.
async fn get_weather(
    State(state): State<AppState>,
    Json(request): Json<WeatherRequest>,
) -> Result<Json<Vec<ForecastEntry>>, ApiError> {
    let city = request.city_name.trim();
    if city.is_empty() {
        return Err(ApiError::BadRequest("City name is required".to_string()));
    }

    info!("Received weather request for city: {city}");

    let entries = state.service.weather_for_city(city).await?;

    // The first entry carries the resolved name on the live path and the
    // user-supplied name on the mock path.
    if let Some(current) = entries.first() {
        state.history.add(&current.city).await?;
    }

    Ok(Json(entries))
}

/// `GET /api/weather/history`: list previously searched cities.
async fn list_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let cities = state.history.cities().await?;
    Ok(Json(cities))
}

/// `DELETE /api/weather/history/{id}`: remove one city from the history.
async fn remove_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RemovalResponse>, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::BadRequest("City ID is required".to_string()));
    }

    state.history.remove(&id).await?;
    info!("Removed history entry {id}");

    Ok(Json(RemovalResponse {
        message: "City removed from search history".to_string(),
    }))
}

/// An empty id segment never reaches the parameterized route, so answer it
/// explicitly instead of letting it 404.
async fn remove_history_missing_id() -> ApiError {
    ApiError::BadRequest("City ID is required".to_string())
}
