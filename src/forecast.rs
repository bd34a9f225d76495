//! Forecast shaping
//!
//! Turns the raw 3-hour-interval series into a compact list of at most six
//! entries (now + up to five days, one reading per day near local noon),
//! and generates the synthetic stand-in served while an API key is still
//! waiting for activation.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use chrono::{Days, NaiveDate, Timelike};
use rand::RngExt;
use tracing::info;

use crate::error::WeathervaneError;
use crate::models::{ForecastEntry, RawSample};

/// Number of future days selected after the current entry
pub const FORECAST_DAYS: usize = 5;

/// Local hours accepted as a day's representative midday reading
const NOON_WINDOW: RangeInclusive<u32> = 11..=13;

const MOCK_ICON: &str = "01d";
const MOCK_DESCRIPTION: &str = "clear sky";

/// Build the forecast list from an ordered raw series.
///
/// Entry 0 is always built from the first sample and labeled with
/// `reference_date`. Scanning in upstream order, each later sample is
/// accepted as the next day iff its calendar date is not yet represented
/// and its local hour lies in the noon window. Days without a qualifying
/// sample are skipped, so sparse input yields fewer than six entries.
pub fn build_forecast(
    samples: &[RawSample],
    city: &str,
    reference_date: NaiveDate,
) -> Result<Vec<ForecastEntry>, WeathervaneError> {
    let Some(current) = samples.first() else {
        return Err(WeathervaneError::upstream(
            "forecast series contained no samples",
        ));
    };

    let mut entries = Vec::with_capacity(FORECAST_DAYS + 1);
    entries.push(entry_from_sample(current, city, reference_date));

    // Seed with the reference day so a later same-day sample cannot be
    // selected again as a "future" day.
    let mut represented_days = HashSet::new();
    represented_days.insert(reference_date);

    for sample in samples {
        if entries.len() > FORECAST_DAYS {
            break;
        }

        let day = sample.timestamp.date_naive();
        if !represented_days.contains(&day) && NOON_WINDOW.contains(&sample.timestamp.hour()) {
            represented_days.insert(day);
            entries.push(entry_from_sample(sample, city, day));
        }
    }

    Ok(entries)
}

/// Generate a synthetic six-entry forecast for `city`.
///
/// Entry 0 carries fixed placeholder values; entries 1-5 share the
/// placeholder condition but draw their numerics from small fixed bands,
/// with dates incrementing one day at a time from `reference_date`.
#[must_use]
pub fn mock_forecast(city: &str, reference_date: NaiveDate) -> Vec<ForecastEntry> {
    info!("Generating mock forecast for '{city}'");

    let mut rng = rand::rng();
    let mut entries = Vec::with_capacity(FORECAST_DAYS + 1);

    entries.push(ForecastEntry {
        city: city.to_string(),
        date: format_date(reference_date),
        icon: MOCK_ICON.to_string(),
        icon_description: MOCK_DESCRIPTION.to_string(),
        temp_f: 72,
        wind_speed: 5,
        humidity: 45,
    });

    for offset in 1..=FORECAST_DAYS {
        entries.push(ForecastEntry {
            city: city.to_string(),
            date: format_date(reference_date + Days::new(offset as u64)),
            icon: MOCK_ICON.to_string(),
            icon_description: MOCK_DESCRIPTION.to_string(),
            temp_f: rng.random_range(70..80),
            wind_speed: rng.random_range(2..12),
            humidity: rng.random_range(30..60),
        });
    }

    entries
}

fn entry_from_sample(sample: &RawSample, city: &str, date: NaiveDate) -> ForecastEntry {
    ForecastEntry {
        city: city.to_string(),
        date: format_date(date),
        icon: sample.icon.clone(),
        icon_description: sample.description.clone(),
        temp_f: sample.temp_f.round() as i32,
        wind_speed: sample.wind_speed.round() as i32,
        humidity: sample.humidity,
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use rstest::rstest;

    fn sample_at(date: NaiveDate, hour: u32, temp_f: f64) -> RawSample {
        let offset = FixedOffset::east_opt(0).unwrap();
        let timestamp = date
            .and_hms_opt(hour, 0, 0)
            .unwrap()
            .and_local_timezone(offset)
            .unwrap();
        RawSample {
            timestamp,
            temp_f,
            wind_speed: 8.4,
            humidity: 61,
            icon: "10d".to_string(),
            description: "light rain".to_string(),
        }
    }

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 3).unwrap()
    }

    /// A noon-window sample on each of the next five days yields the full
    /// six entries with strictly increasing, non-duplicate dates.
    #[test]
    fn test_full_horizon_selects_six_entries() {
        let mut samples = vec![sample_at(reference(), 9, 55.2)];
        for day in 1..=5u64 {
            let date = reference() + Days::new(day);
            samples.push(sample_at(date, 6, 40.0));
            samples.push(sample_at(date, 12, 60.0 + day as f64));
            samples.push(sample_at(date, 18, 50.0));
        }

        let entries = build_forecast(&samples, "Boston", reference()).unwrap();

        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].date, "10/03/2024");
        let dates: Vec<&str> = entries.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(
            dates,
            vec![
                "10/03/2024",
                "10/04/2024",
                "10/05/2024",
                "10/06/2024",
                "10/07/2024",
                "10/08/2024"
            ]
        );
    }

    /// Zero qualifying future-day samples yields today only.
    #[test]
    fn test_no_noon_samples_yields_current_only() {
        let samples = vec![
            sample_at(reference(), 9, 55.2),
            sample_at(reference() + Days::new(1), 6, 40.0),
            sample_at(reference() + Days::new(1), 18, 50.0),
            sample_at(reference() + Days::new(2), 21, 47.0),
        ];

        let entries = build_forecast(&samples, "Boston", reference()).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, "10/03/2024");
    }

    /// Entry 0 is built from the first sample regardless of its timestamp,
    /// but labeled with the reference date.
    #[test]
    fn test_current_entry_uses_first_sample_and_reference_date() {
        let stale = sample_at(reference() - Days::new(1), 23, 71.6);
        let entries = build_forecast(&[stale], "Boston", reference()).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, "10/03/2024");
        assert_eq!(entries[0].temp_f, 72);
        assert_eq!(entries[0].icon, "10d");
    }

    /// A noon-window sample later on the reference day must not be selected
    /// again as a future day.
    #[test]
    fn test_reference_day_is_never_selected_twice() {
        let samples = vec![
            sample_at(reference(), 9, 55.2),
            sample_at(reference(), 12, 58.0),
            sample_at(reference() + Days::new(1), 12, 61.0),
        ];

        let entries = build_forecast(&samples, "Boston", reference()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].date, "10/04/2024");
    }

    /// Only the first qualifying sample represents a day.
    #[test]
    fn test_one_sample_per_day() {
        let tomorrow = reference() + Days::new(1);
        let samples = vec![
            sample_at(reference(), 9, 55.2),
            sample_at(tomorrow, 11, 60.0),
            sample_at(tomorrow, 12, 65.0),
            sample_at(tomorrow, 13, 70.0),
        ];

        let entries = build_forecast(&samples, "Boston", reference()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].temp_f, 60);
    }

    #[rstest]
    #[case(10, false)]
    #[case(11, true)]
    #[case(12, true)]
    #[case(13, true)]
    #[case(14, false)]
    fn test_noon_window_bounds(#[case] hour: u32, #[case] selected: bool) {
        let samples = vec![
            sample_at(reference(), 9, 55.2),
            sample_at(reference() + Days::new(1), hour, 60.0),
        ];

        let entries = build_forecast(&samples, "Boston", reference()).unwrap();
        assert_eq!(entries.len(), if selected { 2 } else { 1 });
    }

    /// Temperature and wind round to the nearest integer; humidity passes
    /// through untouched.
    #[test]
    fn test_numeric_rounding() {
        let mut sample = sample_at(reference(), 9, 55.5);
        sample.wind_speed = 3.4;
        sample.humidity = 87;

        let entries = build_forecast(&[sample], "Boston", reference()).unwrap();

        assert_eq!(entries[0].temp_f, 56);
        assert_eq!(entries[0].wind_speed, 3);
        assert_eq!(entries[0].humidity, 87);
    }

    #[test]
    fn test_empty_series_is_an_error() {
        let result = build_forecast(&[], "Boston", reference());
        assert!(matches!(
            result,
            Err(WeathervaneError::Upstream { .. })
        ));
    }

    #[test]
    fn test_mock_forecast_shape() {
        let entries = mock_forecast("Boston", reference());

        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].temp_f, 72);
        assert_eq!(entries[0].wind_speed, 5);
        assert_eq!(entries[0].humidity, 45);

        let expected_dates = [
            "10/03/2024",
            "10/04/2024",
            "10/05/2024",
            "10/06/2024",
            "10/07/2024",
            "10/08/2024",
        ];
        for (entry, expected) in entries.iter().zip(expected_dates) {
            assert_eq!(entry.city, "Boston");
            assert_eq!(entry.icon, "01d");
            assert_eq!(entry.icon_description, "clear sky");
            assert_eq!(entry.date, expected);
        }
    }

    #[test]
    fn test_mock_forecast_value_bands() {
        // Bounded-random values stay inside their documented bands.
        for _ in 0..50 {
            let entries = mock_forecast("Boston", reference());
            for entry in &entries[1..] {
                assert!((70..80).contains(&entry.temp_f));
                assert!((2..12).contains(&entry.wind_speed));
                assert!((30..60).contains(&entry.humidity));
            }
        }
    }

    #[test]
    fn test_mock_forecast_crosses_month_boundary() {
        let end_of_month = NaiveDate::from_ymd_opt(2024, 10, 30).unwrap();
        let entries = mock_forecast("Boston", end_of_month);
        assert_eq!(entries[2].date, "11/01/2024");
        assert_eq!(entries[5].date, "11/04/2024");
    }
}
