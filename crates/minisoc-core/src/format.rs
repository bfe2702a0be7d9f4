//! Display formatting for byte sizes, durations, counts and timestamps.
//!
//! Pure functions shared by every panel renderer.

use chrono::{DateTime, NaiveDateTime};

const BYTE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Human-readable byte size with a 1024 divisor.
///
/// Values are rounded to two decimals and trailing zeros dropped:
/// `0 -> "0 B"`, `1024 -> "1 KB"`, `1536 -> "1.5 KB"`. Anything past
/// gigabytes stays in GB.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".into();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", BYTE_UNITS[unit])
}

/// Seconds rendered as whole milliseconds: `0.0421 -> "42ms"`.
pub fn format_duration_ms(seconds: f64) -> String {
    let ms = (seconds * 1000.0).round();
    format!("{ms}ms")
}

/// Integer with thousands separators: `1234567 -> "1,234,567"`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Backend ISO-8601 timestamp as `YYYY-MM-DD HH:MM:SS`.
///
/// Accepts naive timestamps (the backend's usual form) and RFC 3339 with an
/// offset. Anything else is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map_or_else(
        |_| raw.to_owned(),
        |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

/// Short `HH:MM` label for timeline buckets.
pub fn format_bucket(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%H:%M").to_string();
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map_or_else(|_| raw.to_owned(), |dt| dt.format("%H:%M").to_string())
}
