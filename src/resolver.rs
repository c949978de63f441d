//! Forecast resolution engine
//!
//! Turns the coarse hourly series from the forecast service into
//! point-in-time answers at arbitrary hour offsets. The two numeric
//! quantities (rain, precipitation) are linearly interpolated onto a
//! one-minute grid; the categorical weather code is forward-filled so that
//! category boundaries stay exact integers. Queries snap to the nearest
//! grid point, clamped to the grid's span.

use chrono::{DateTime, Duration, FixedOffset, Utc};

use crate::data::{code_label, ForecastAnswer, HourlySample};

/// Grid spacing in seconds (one minute)
const GRID_STEP_SECONDS: i64 = 60;

/// Fixed local timezone offset (UTC+7) applied to every answer timestamp
const LOCAL_OFFSET_SECONDS: i32 = 7 * 3600;

/// A continuous-time queryable forecast built from hourly samples
///
/// Holds three parallel series on a uniform one-minute grid spanning the
/// sample range. Built fresh per request and never mutated.
#[derive(Debug, Clone)]
pub struct ContinuousForecast {
    start: DateTime<Utc>,
    rain: Vec<f64>,
    precipitation: Vec<f64>,
    weather_code: Vec<u16>,
}

/// The values at one grid point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub time: DateTime<Utc>,
    pub rain: f64,
    pub precipitation: f64,
    pub weather_code: u16,
}

impl ContinuousForecast {
    /// Build a continuous forecast from an hourly series
    ///
    /// The input is sorted defensively; duplicate timestamps keep the
    /// last-seen sample. Returns `None` for an empty series.
    pub fn from_samples(samples: &[HourlySample]) -> Option<Self> {
        let samples = clean_samples(samples);
        let first = samples.first()?;
        let last = samples.last()?;

        let minutes = (last.time - first.time).num_minutes().max(0) as usize + 1;
        let mut rain = Vec::with_capacity(minutes);
        let mut precipitation = Vec::with_capacity(minutes);
        let mut weather_code = Vec::with_capacity(minutes);

        // Index of the latest sample at or before the current grid point
        let mut j = 0usize;
        for i in 0..minutes {
            let t = first.time + Duration::seconds(i as i64 * GRID_STEP_SECONDS);
            while j + 1 < samples.len() && samples[j + 1].time <= t {
                j += 1;
            }

            weather_code.push(samples[j].weather_code);

            if j + 1 < samples.len() && samples[j].time < t {
                let span = (samples[j + 1].time - samples[j].time).num_seconds();
                let frac = (t - samples[j].time).num_seconds() as f64 / span as f64;
                rain.push(lerp(samples[j].rain, samples[j + 1].rain, frac));
                precipitation.push(lerp(
                    samples[j].precipitation,
                    samples[j + 1].precipitation,
                    frac,
                ));
            } else {
                // At a sample, or clamped to the boundary sample's value
                rain.push(samples[j].rain);
                precipitation.push(samples[j].precipitation);
            }
        }

        Some(Self {
            start: first.time,
            rain,
            precipitation,
            weather_code,
        })
    }

    /// Values at the grid point nearest to the given instant
    ///
    /// Instants outside the grid clamp to the nearest edge point; ties
    /// exactly between two grid points resolve to the earlier one.
    pub fn at(&self, instant: DateTime<Utc>) -> GridPoint {
        let idx = self.nearest_index(instant);
        GridPoint {
            time: self.start + Duration::seconds(idx as i64 * GRID_STEP_SECONDS),
            rain: self.rain[idx],
            precipitation: self.precipitation[idx],
            weather_code: self.weather_code[idx],
        }
    }

    /// Index of the grid point nearest to the instant, clamped to the grid
    fn nearest_index(&self, instant: DateTime<Utc>) -> usize {
        let secs = (instant - self.start).num_seconds();
        if secs <= 0 {
            return 0;
        }
        let idx = secs / GRID_STEP_SECONDS;
        let rem = secs % GRID_STEP_SECONDS;
        let idx = if rem > GRID_STEP_SECONDS / 2 {
            idx + 1
        } else {
            idx
        };
        (idx as usize).min(self.rain.len() - 1)
    }
}

/// Resolve an hourly series against a batch of hour offsets from `now`
///
/// `now` is captured once by the caller so a multi-offset batch stays
/// internally consistent. Answers are emitted in the order the offsets are
/// given. An empty sample series yields no answers.
pub fn resolve_offsets(
    samples: &[HourlySample],
    now: DateTime<Utc>,
    offsets: &[u32],
) -> Vec<ForecastAnswer> {
    let Some(forecast) = ContinuousForecast::from_samples(samples) else {
        return Vec::new();
    };

    offsets
        .iter()
        .map(|&offset| {
            let instant = now + Duration::hours(i64::from(offset));
            let point = forecast.at(instant);
            ForecastAnswer {
                offset_hours: offset,
                local_time: point.time.with_timezone(&local_offset()),
                weather_code: point.weather_code,
                rain: point.rain,
                precipitation: point.precipitation,
                label: code_label(point.weather_code),
            }
        })
        .collect()
}

/// Sort samples by timestamp and drop duplicate timestamps, keeping the
/// last-seen value for each
fn clean_samples(samples: &[HourlySample]) -> Vec<HourlySample> {
    let mut cleaned = samples.to_vec();
    cleaned.sort_by_key(|s| s.time);
    // sort_by_key is stable, so within a duplicate run the later-seen
    // sample is the later element; keep it
    cleaned.dedup_by(|later, earlier| {
        if later.time == earlier.time {
            *earlier = later.clone();
            true
        } else {
            false
        }
    });
    cleaned
}

/// Linear interpolation between `a` and `b` at fraction `frac` in [0, 1]
fn lerp(a: f64, b: f64, frac: f64) -> f64 {
    a + (b - a) * frac
}

/// The fixed UTC+7 local offset
fn local_offset() -> FixedOffset {
    FixedOffset::east_opt(LOCAL_OFFSET_SECONDS).expect("UTC+7 is a valid offset")
}
