//! Forecast models: the compact per-day snapshot served to clients and the
//! raw 3-hour samples consumed while building it.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One day's (or the current) weather snapshot.
///
/// A forecast result is a sequence of 1 to 6 of these: index 0 is always
/// "now", subsequent entries are strictly increasing by calendar date.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastEntry {
    /// Resolved place name
    pub city: String,
    /// Calendar date, formatted `MM/DD/YYYY`
    pub date: String,
    /// Short icon code, opaque to this service
    pub icon: String,
    /// Human-readable condition text
    pub icon_description: String,
    /// Temperature in whole degrees Fahrenheit
    pub temp_f: i32,
    /// Wind speed in whole units
    pub wind_speed: i32,
    /// Humidity percentage, passed through from upstream
    pub humidity: u8,
}

/// One upstream 3-hour-interval reading.
///
/// Transient: consumed entirely while shaping the forecast, never persisted.
/// The timestamp is already shifted into the forecast location's own
/// timezone so calendar-day and hour checks do not depend on where the
/// server runs.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSample {
    /// Sample time, localized to the forecast location
    pub timestamp: DateTime<FixedOffset>,
    /// Temperature in degrees Fahrenheit, unrounded
    pub temp_f: f64,
    /// Wind speed, unrounded
    pub wind_speed: f64,
    /// Humidity percentage
    pub humidity: u8,
    /// Icon code for the dominant condition
    pub icon: String,
    /// Condition description text
    pub description: String,
}

/// An ordered series of raw samples together with the UTC offset the
/// forecast endpoint reported for the location.
#[derive(Debug, Clone)]
pub struct ForecastSeries {
    /// UTC offset of the forecast location
    pub utc_offset: FixedOffset,
    /// Samples in upstream order, roughly 5 days at 3-hour intervals
    pub samples: Vec<RawSample>,
}

impl ForecastSeries {
    /// Today's calendar date at the forecast location.
    #[must_use]
    pub fn local_today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.utc_offset).date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_forecast_entry_serializes_camel_case() {
        let entry = ForecastEntry {
            city: "Boston".to_string(),
            date: "10/03/2024".to_string(),
            icon: "01d".to_string(),
            icon_description: "clear sky".to_string(),
            temp_f: 72,
            wind_speed: 5,
            humidity: 45,
        };

        let json = serde_json::to_value(&entry).expect("serialization failed");
        assert_eq!(json["iconDescription"], "clear sky");
        assert_eq!(json["tempF"], 72);
        assert_eq!(json["windSpeed"], 5);
        assert!(json.get("icon_description").is_none());
    }

    #[test]
    fn test_local_today_crosses_date_line() {
        // 23:30 UTC is already the next day at UTC+5
        let offset = FixedOffset::east_opt(5 * 3600).expect("valid offset");
        let series = ForecastSeries {
            utc_offset: offset,
            samples: Vec::new(),
        };

        let now = Utc.with_ymd_and_hms(2024, 10, 3, 23, 30, 0).unwrap();
        assert_eq!(
            series.local_today(now),
            NaiveDate::from_ymd_opt(2024, 10, 4).unwrap()
        );
    }
}
