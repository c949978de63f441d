//! WMO weather code catalog
//!
//! Static mapping from WMO weather classification codes to human-readable
//! category labels, as published by the forecast service.

/// Look up the category label for a WMO weather code
///
/// # Returns
/// * `Some(label)` for codes in the catalog
/// * `None` for codes the catalog does not know
pub fn describe_code(code: u16) -> Option<&'static str> {
    let label = match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snowfall",
        73 => "Moderate snowfall",
        75 => "Heavy snowfall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => return None,
    };
    Some(label)
}

/// Label for a weather code, falling back to `Unknown (<code>)` for codes
/// absent from the catalog
pub fn code_label(code: u16) -> String {
    match describe_code(code) {
        Some(label) => label.to_string(),
        None => format!("Unknown ({})", code),
    }
}
