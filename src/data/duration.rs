use std::time::Duration;

use anyhow::{bail, Result};

/// Suffix to milliseconds multiplier (order matters: longer suffixes first)
const UNITS: &[(&str, f64)] = &[
    ("ms", 1.0),
    ("s", 1_000.0),
    ("m", 60_000.0),
];

/// Parse timeout strings like "10", "10s", "2.5s", "500ms", "1m".
///
/// A bare number is taken as seconds, matching the usual `-t` convention of
/// monitoring plugins.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    if let Ok(secs) = s.parse::<f64>() {
        return to_duration(secs * 1_000.0, s);
    }

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str.trim().parse()?;
            return to_duration(val * multiplier, s);
        }
    }

    bail!("Unknown duration format: {}", s)
}

fn to_duration(millis: f64, original: &str) -> Result<Duration> {
    if !millis.is_finite() || millis <= 0.0 {
        bail!("Duration must be positive: {}", original);
    }
    Ok(Duration::from_micros((millis * 1_000.0) as u64))
}
