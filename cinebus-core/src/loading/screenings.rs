//! Screening list from a CSV billboard export

use std::path::Path;

use chrono::{NaiveTime, Timelike};
use geo::Point;
use log::{info, warn};
use serde::Deserialize;

use super::parser::deserialize_csv_file;
use crate::screenings::Screening;
use crate::{Error, Time};

#[derive(Debug, Clone, Deserialize)]
pub struct ScreeningRecord {
    pub film: String,
    pub cinema: String,
    pub lon: f64,
    pub lat: f64,
    /// `HH:MM` or `HH:MM:SS`
    pub start: String,
}

/// Parse a time of day into seconds since midnight
///
/// # Errors
///
/// Returns [`Error::InvalidData`] if `value` is neither `HH:MM` nor `HH:MM:SS`
pub fn parse_time_of_day(value: &str) -> Result<Time, Error> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map(|time| time.num_seconds_from_midnight())
        .map_err(|e| Error::InvalidData(format!("invalid time of day '{value}': {e}")))
}

/// Format seconds since midnight as `HH:MM`
pub fn format_time_of_day(time: Time) -> String {
    format!("{:02}:{:02}", time / 3600, (time % 3600) / 60)
}

/// Load screenings sorted by start time. Rows with a bad position or start time are skipped.
///
/// # Errors
///
/// Returns an error if the file cannot be read
pub fn screenings_from_csv(path: &Path) -> Result<Vec<Screening>, Error> {
    let records: Vec<ScreeningRecord> = deserialize_csv_file(path)?;
    let screenings = screenings_from_records(records);
    info!("Loaded {} screenings", screenings.len());
    Ok(screenings)
}

pub fn screenings_from_records(records: Vec<ScreeningRecord>) -> Vec<Screening> {
    let mut screenings: Vec<Screening> = records
        .into_iter()
        .filter(|record| {
            let valid = record.lon.is_finite() && record.lat.is_finite();
            if !valid {
                warn!(
                    "Skipping screening of '{}' at {} with invalid position",
                    record.film, record.cinema
                );
            }
            valid
        })
        .filter_map(|record| match parse_time_of_day(&record.start) {
            Ok(start) => Some(Screening {
                film: record.film,
                cinema: record.cinema,
                location: Point::new(record.lon, record.lat),
                start,
            }),
            Err(e) => {
                warn!("Skipping screening of '{}': {e}", record.film);
                None
            }
        })
        .collect();
    screenings.sort_by_key(|screening| screening.start);
    screenings
}
