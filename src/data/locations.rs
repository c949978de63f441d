//! Static location registry
//!
//! This module contains the fixed table of locations the weather command
//! understands, with their geographic coordinates. Lookup is case-insensitive.

use thiserror::Error;

/// A named location the bot can produce forecasts for
///
/// Uses `&'static str` for the name to allow static initialization of the
/// LOCATIONS table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// Human-readable name, also the lookup key (matched case-insensitively)
    pub name: &'static str,
    /// Latitude coordinate
    pub latitude: f64,
    /// Longitude coordinate
    pub longitude: f64,
}

/// Errors produced by location lookup
#[derive(Debug, Error)]
pub enum LocationError {
    /// The requested name is not in the registry
    #[error("Unknown location '{name}'. Valid locations: {}", .valid.join(", "))]
    UnknownLocation {
        name: String,
        valid: Vec<&'static str>,
    },
}

/// Static table of all known locations
pub static LOCATIONS: [Location; 2] = [
    Location {
        name: "Depok",
        latitude: -6.4025,
        longitude: 106.7942,
    },
    Location {
        name: "Jakarta",
        latitude: -6.2088,
        longitude: 106.8456,
    },
];

/// Location used when the weather command names none
pub static DEFAULT_LOCATION: &Location = &LOCATIONS[0];

/// Look up a location by name, case-insensitively
///
/// # Returns
/// * `Ok(&Location)` if the name matches a registry entry
/// * `Err(LocationError::UnknownLocation)` carrying the valid names otherwise
pub fn resolve_location(name: &str) -> Result<&'static Location, LocationError> {
    LOCATIONS
        .iter()
        .find(|loc| loc.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| LocationError::UnknownLocation {
            name: name.to_string(),
            valid: LOCATIONS.iter().map(|loc| loc.name).collect(),
        })
}

/// Get all registered locations
pub fn all_locations() -> &'static [Location] {
    &LOCATIONS
}
