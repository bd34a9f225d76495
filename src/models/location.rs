//! Resolved location model

use serde::{Deserialize, Serialize};

/// Geographic coordinates with the canonical place name the geocoding
/// service resolved for them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
    /// Canonical place name, distinct from the user-supplied query
    pub name: String,
}

impl Coordinates {
    /// Create new coordinates
    #[must_use]
    pub fn new(lat: f64, lon: f64, name: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            name: name.into(),
        }
    }

    /// Format coordinates for log output
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lon)
    }
}
