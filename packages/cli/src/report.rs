//! Text formatting for the risk summary report.

use chrono::{DateTime, Utc};

/// Formats a magnitude with one decimal, or "N/A".
#[must_use]
pub fn format_magnitude(magnitude: Option<f64>) -> String {
    magnitude
        .filter(|m| m.is_finite())
        .map_or_else(|| "N/A".to_string(), |m| format!("{m:.1}"))
}

/// Formats a depth as whole kilometers, or "N/A".
#[must_use]
pub fn format_depth(depth_km: Option<f64>) -> String {
    depth_km
        .filter(|d| d.is_finite())
        .map_or_else(|| "N/A".to_string(), |d| format!("{} km", d.round()))
}

/// Formats a distance: whole kilometers at or above 100 km, one decimal
/// below, or "N/A".
#[must_use]
pub fn format_distance(km: Option<f64>) -> String {
    match km.filter(|d| d.is_finite()) {
        None => "N/A".to_string(),
        Some(d) if d >= 100.0 => format!("{} km", d.round()),
        Some(d) => format!("{d:.1} km"),
    }
}

/// Formats an instant as `YYYY-MM-DD HH:MM UTC`, or "Unknown".
#[must_use]
pub fn format_datetime_utc(instant: Option<DateTime<Utc>>) -> String {
    instant.map_or_else(
        || "Unknown".to_string(),
        |at| at.format("%Y-%m-%d %H:%M UTC").to_string(),
    )
}

/// Cleans a raw belt name for display: ":"-separated plate pairs join
/// with "&", empty names fall back to a generic label.
#[must_use]
pub fn format_belt_name(raw: &str) -> String {
    if raw.is_empty() {
        return "Seismic belt".to_string();
    }
    raw.split(':')
        .map(str::trim)
        .collect::<Vec<&str>>()
        .join(" & ")
}
