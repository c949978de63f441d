//! Core data models for kabarbot
//!
//! This module contains the data types shared between the upstream API
//! clients, the forecast resolver, and the command dispatcher.

pub mod codes;
pub mod facts;
pub mod forecast;
pub mod locations;

pub use codes::{code_label, describe_code};
pub use facts::{FactClient, FactError};
pub use forecast::{ForecastClient, ForecastError};
pub use locations::{all_locations, resolve_location, Location, LocationError, DEFAULT_LOCATION};

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// One hour of raw forecast data as returned by the forecast service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySample {
    /// UTC instant this sample describes
    pub time: DateTime<Utc>,
    /// Rain in millimetres, non-negative
    pub rain: f64,
    /// Total precipitation in millimetres, non-negative
    pub precipitation: f64,
    /// WMO weather classification code
    pub weather_code: u16,
}

/// A resolved forecast value for one requested hour offset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastAnswer {
    /// The requested offset in whole hours from "now"
    pub offset_hours: u32,
    /// Timestamp of the chosen grid point, projected to local time (UTC+7)
    pub local_time: DateTime<FixedOffset>,
    /// Forward-filled WMO weather code at the grid point
    pub weather_code: u16,
    /// Interpolated rain in millimetres
    pub rain: f64,
    /// Interpolated precipitation in millimetres
    pub precipitation: f64,
    /// Human-readable category for `weather_code`
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_hourly_sample_serialization_roundtrip() {
        let sample = HourlySample {
            time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            rain: 0.4,
            precipitation: 0.6,
            weather_code: 61,
        };

        let json = serde_json::to_string(&sample).expect("Failed to serialize HourlySample");
        let back: HourlySample =
            serde_json::from_str(&json).expect("Failed to deserialize HourlySample");

        assert_eq!(back, sample);
    }
}
