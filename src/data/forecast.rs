//! Open-Meteo forecast API client
//!
//! This module fetches the raw hourly forecast series (rain, precipitation,
//! weather code) for a coordinate over a two-day window and parses it into
//! [`HourlySample`] values for the resolver.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::HourlySample;

/// Base URL for the Open-Meteo forecast API
const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Fixed forecast model requested from the service
const FORECAST_MODEL: &str = "icon_seamless";

/// Errors that can occur when fetching forecast data
#[derive(Debug, Error)]
pub enum ForecastError {
    /// HTTP request failed before a status was received
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Upstream replied with a non-success status
    #[error("Forecast service returned status {0}")]
    Status(u16),

    /// Failed to parse the JSON response body
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Response body did not match the expected schema
    #[error("Malformed forecast response: {0}")]
    Schema(String),
}

/// Client for fetching hourly forecasts from Open-Meteo
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl Default for ForecastClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastClient {
    /// Create a new ForecastClient with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: OPEN_METEO_BASE_URL.to_string(),
        }
    }

    /// Create a new ForecastClient with a custom HTTP client
    #[allow(dead_code)]
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: OPEN_METEO_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different base URL (used by tests)
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch the hourly forecast series for the given coordinates and window
    ///
    /// Issues a single GET request, no retries, no caching. The window is two
    /// ISO calendar dates at UTC-day granularity, both inclusive.
    ///
    /// # Returns
    /// * `Ok(Vec<HourlySample>)` - The parsed hourly series, in service order
    /// * `Err(ForecastError)` - If the request fails, the status is non-2xx,
    ///   or the body violates the expected schema
    pub async fn fetch_hourly(
        &self,
        latitude: f64,
        longitude: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<HourlySample>, ForecastError> {
        let url = format!(
            "{}?latitude={}&longitude={}&hourly=rain,precipitation,weather_code&start_date={}&end_date={}&models={}",
            self.base_url, latitude, longitude, start_date, end_date, FORECAST_MODEL
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ForecastError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        let api_response: OpenMeteoResponse = serde_json::from_str(&text)?;

        parse_hourly_data(&api_response.hourly)
    }
}

/// Parse the parallel hourly arrays into HourlySample structs
fn parse_hourly_data(hourly: &HourlyData) -> Result<Vec<HourlySample>, ForecastError> {
    let len = hourly.time.len();

    if hourly.rain.len() != len
        || hourly.precipitation.len() != len
        || hourly.weather_code.len() != len
    {
        return Err(ForecastError::Schema(
            "hourly arrays have inconsistent lengths".to_string(),
        ));
    }

    let mut samples = Vec::with_capacity(len);
    for i in 0..len {
        samples.push(HourlySample {
            time: parse_utc_datetime(&hourly.time[i])?,
            rain: hourly.rain[i],
            precipitation: hourly.precipitation[i],
            weather_code: round_weather_code(hourly.weather_code[i]),
        });
    }

    Ok(samples)
}

/// Parse a datetime string in Open-Meteo format (e.g., "2024-01-01T13:00"),
/// which is UTC when no timezone parameter is requested
fn parse_utc_datetime(datetime_str: &str) -> Result<DateTime<Utc>, ForecastError> {
    NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%dT%H:%M")
        .map(|naive| naive.and_utc())
        .map_err(|_| ForecastError::Schema(format!("invalid timestamp '{}'", datetime_str)))
}

/// Round a numeric weather code to the nearest integer, half away from zero
///
/// The service sends integral codes, but the value is numeric JSON and must
/// not be trusted to arrive without a fractional part.
fn round_weather_code(code: f64) -> u16 {
    code.round().max(0.0) as u16
}

/// Open-Meteo API response structure
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    hourly: HourlyData,
}

/// Parallel hourly data arrays from Open-Meteo
#[derive(Debug, Deserialize)]
struct HourlyData {
    time: Vec<String>,
    rain: Vec<f64>,
    precipitation: Vec<f64>,
    weather_code: Vec<f64>,
}
