//! Command dispatcher
//!
//! Parses the text commands delivered by the messaging platform, drives the
//! upstream clients and the forecast resolver, and formats the reply text.
//! Every upstream failure turns into a user-facing message; nothing here is
//! fatal to the process.

use chrono::{Duration, Utc};
use log::{info, warn};

use crate::data::{
    resolve_location, FactClient, FactError, ForecastAnswer, ForecastClient, ForecastError,
    Location, LocationError, DEFAULT_LOCATION,
};
use crate::resolver::resolve_offsets;

/// Prefix the platform uses to mark bot commands
pub const COMMAND_PREFIX: &str = "!p";

/// A parsed weather command
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherRequest {
    /// The resolved location to forecast for
    pub location: &'static Location,
    /// The largest requested hour offset; the reply covers `0..=max_offset`
    pub max_offset: u32,
}

/// Dispatches parsed commands to the upstream clients
#[derive(Debug, Clone)]
pub struct Dispatcher {
    facts: FactClient,
    forecast: ForecastClient,
    fact_url: String,
}

impl Dispatcher {
    /// Create a dispatcher over the given clients
    pub fn new(facts: FactClient, forecast: ForecastClient, fact_url: String) -> Self {
        Self {
            facts,
            forecast,
            fact_url,
        }
    }

    /// Handle one incoming message
    ///
    /// # Returns
    /// * `Some(reply)` for recognized command text (including error replies)
    /// * `None` for text that is not a command
    pub async fn dispatch(&self, content: &str) -> Option<String> {
        let (command, args) = parse_command(content)?;
        info!("Handling command '{}' with args {:?}", command, args);

        let reply = match command {
            "get" => self.handle_fact().await,
            "weather" => self.handle_weather(&args).await,
            other => {
                format!(
                    "Unknown command '{}'. Try {}get or {}weather [location] [hours]",
                    other, COMMAND_PREFIX, COMMAND_PREFIX
                )
            }
        };
        Some(reply)
    }

    /// Fetch one fact and relay it
    async fn handle_fact(&self) -> String {
        match self.facts.fetch_fact(&self.fact_url).await {
            Ok(fact) => fact,
            Err(FactError::Status(code)) => {
                warn!("Fact fetch failed with status {}", code);
                format!("Response error {}", code)
            }
            Err(err) => {
                warn!("Fact fetch failed: {}", err);
                "Could not read the fact response".to_string()
            }
        }
    }

    /// Fetch a two-day forecast window and resolve the requested offsets
    async fn handle_weather(&self, args: &[&str]) -> String {
        let request = match parse_weather_args(args) {
            Ok(request) => request,
            Err(err) => return err.to_string(),
        };

        // Captured once so the whole offset batch is consistent
        let now = Utc::now();
        let start_date = now.date_naive();
        let end_date = start_date + Duration::days(1);

        let samples = match self
            .forecast
            .fetch_hourly(
                request.location.latitude,
                request.location.longitude,
                start_date,
                end_date,
            )
            .await
        {
            Ok(samples) => samples,
            Err(ForecastError::Status(code)) => {
                warn!("Forecast fetch failed with status {}", code);
                return format!("Response error {}", code);
            }
            Err(err) => {
                warn!("Forecast fetch failed: {}", err);
                return "Could not read the forecast response".to_string();
            }
        };

        let offsets: Vec<u32> = (0..=request.max_offset).collect();
        let answers = resolve_offsets(&samples, now, &offsets);
        if answers.is_empty() {
            warn!("Forecast response contained no hourly samples");
            return "Could not read the forecast response".to_string();
        }

        format_forecast_reply(request.location.name, &answers)
    }
}

/// Split message text into a command name and its arguments
///
/// Returns `None` when the text does not carry the command prefix.
fn parse_command(content: &str) -> Option<(&str, Vec<&str>)> {
    let rest = content.trim().strip_prefix(COMMAND_PREFIX)?;
    let mut words = rest.split_whitespace();
    let command = words.next()?;
    Some((command, words.collect()))
}

/// Parse the weather command's free-text arguments
///
/// Rules: no arguments means the default location at offset 0. A single
/// argument is an offset if it parses as a non-negative integer, otherwise a
/// location name. Two arguments are `<location> <offset>`, with a non-numeric
/// offset falling back to 0. Extra arguments are ignored.
pub fn parse_weather_args(args: &[&str]) -> Result<WeatherRequest, LocationError> {
    match args {
        [] => Ok(WeatherRequest {
            location: DEFAULT_LOCATION,
            max_offset: 0,
        }),
        [single] => match single.parse::<u32>() {
            Ok(offset) => Ok(WeatherRequest {
                location: DEFAULT_LOCATION,
                max_offset: offset,
            }),
            Err(_) => Ok(WeatherRequest {
                location: resolve_location(single)?,
                max_offset: 0,
            }),
        },
        [name, offset, ..] => Ok(WeatherRequest {
            location: resolve_location(name)?,
            max_offset: offset.parse::<u32>().unwrap_or(0),
        }),
    }
}

/// Format the resolved answers into the reply text
pub fn format_forecast_reply(location_name: &str, answers: &[ForecastAnswer]) -> String {
    let mut lines = Vec::with_capacity(answers.len() + 1);
    lines.push(format!("Weather forecast ({})", location_name));
    for answer in answers {
        lines.push(format!(
            "+{}h {}: {}, rain {:.1} mm, precipitation {:.1} mm",
            answer.offset_hours,
            answer.local_time.format("%Y-%m-%d %H:%M"),
            answer.label,
            answer.rain,
            answer.precipitation,
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn test_parse_command_strips_prefix() {
        let (command, args) = parse_command("!pweather Depok 3").unwrap();
        assert_eq!(command, "weather");
        assert_eq!(args, vec!["Depok", "3"]);
    }

    #[test]
    fn test_parse_command_get_has_no_args() {
        let (command, args) = parse_command("!pget").unwrap();
        assert_eq!(command, "get");
        assert!(args.is_empty());
    }

    #[test]
    fn test_parse_command_ignores_non_command_text() {
        assert!(parse_command("hello there").is_none());
        assert!(parse_command("").is_none());
        assert!(parse_command("!p").is_none());
    }

    #[test]
    fn test_parse_command_tolerates_surrounding_whitespace() {
        let (command, args) = parse_command("  !pweather jakarta  ").unwrap();
        assert_eq!(command, "weather");
        assert_eq!(args, vec!["jakarta"]);
    }

    #[test]
    fn test_weather_args_empty_defaults() {
        let request = parse_weather_args(&[]).unwrap();
        assert_eq!(request.location.name, "Depok");
        assert_eq!(request.max_offset, 0);
    }

    #[test]
    fn test_weather_args_single_numeric_is_offset() {
        let request = parse_weather_args(&["5"]).unwrap();
        assert_eq!(request.location.name, "Depok");
        assert_eq!(request.max_offset, 5);
    }

    #[test]
    fn test_weather_args_single_name_is_location() {
        let request = parse_weather_args(&["jakarta"]).unwrap();
        assert_eq!(request.location.name, "Jakarta");
        assert_eq!(request.max_offset, 0);
    }

    #[test]
    fn test_weather_args_two_arguments() {
        let request = parse_weather_args(&["depok", "12"]).unwrap();
        assert_eq!(request.location.name, "Depok");
        assert_eq!(request.max_offset, 12);
    }

    #[test]
    fn test_weather_args_non_numeric_offset_falls_back_to_zero() {
        let request = parse_weather_args(&["jakarta", "soon"]).unwrap();
        assert_eq!(request.location.name, "Jakarta");
        assert_eq!(request.max_offset, 0);
    }

    #[test]
    fn test_weather_args_negative_offset_is_not_numeric() {
        // u32 parsing rejects it, so it is treated as a location name
        assert!(parse_weather_args(&["-3"]).is_err());
    }

    #[test]
    fn test_weather_args_unknown_location_lists_valid_names() {
        let err = parse_weather_args(&["Nowhere"]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Depok"));
        assert!(msg.contains("Jakarta"));
    }

    #[test]
    fn test_format_forecast_reply_uses_resolved_location_name() {
        let answers = vec![ForecastAnswer {
            offset_hours: 0,
            local_time: FixedOffset::east_opt(7 * 3600)
                .unwrap()
                .with_ymd_and_hms(2024, 1, 1, 7, 0, 0)
                .unwrap(),
            weather_code: 0,
            rain: 0.0,
            precipitation: 0.0,
            label: "Clear sky".to_string(),
        }];

        let reply = format_forecast_reply("Jakarta", &answers);
        assert!(reply.starts_with("Weather forecast (Jakarta)"));
        assert!(reply.contains("+0h 2024-01-01 07:00: Clear sky"));
        assert!(reply.contains("rain 0.0 mm"));
    }

    #[test]
    fn test_format_forecast_reply_one_line_per_answer() {
        let local = FixedOffset::east_opt(7 * 3600).unwrap();
        let answers: Vec<ForecastAnswer> = (0..3)
            .map(|offset| ForecastAnswer {
                offset_hours: offset,
                local_time: local
                    .with_ymd_and_hms(2024, 1, 1, 7 + offset, 0, 0)
                    .unwrap(),
                weather_code: 61,
                rain: 1.23,
                precipitation: 1.5,
                label: "Slight rain".to_string(),
            })
            .collect();

        let reply = format_forecast_reply("Depok", &answers);
        assert_eq!(reply.lines().count(), 4);
        assert!(reply.contains("+2h 2024-01-01 09:00: Slight rain, rain 1.2 mm"));
    }
}
