//! Data models for the weathervane service

pub mod forecast;
pub mod history;
pub mod location;

pub use forecast::{ForecastEntry, ForecastSeries, RawSample};
pub use history::HistoryEntry;
pub use location::Coordinates;
