//! Marker styling for the GeoJSON export.
//!
//! Mirrors the dashboard's rendering rules: marker radius grows with
//! magnitude above the 6.0 floor, marker color runs an HSL ramp from
//! blue-green to magenta across the significance range.

use quake_map_models::SIGNIFICANCE_RANGE;

/// Fallback marker color for records without a finite significance.
const UNKNOWN_SIGNIFICANCE_COLOR: &str = "#94a3b8";

/// Marker radius in display pixels for a magnitude.
#[must_use]
pub fn magnitude_to_radius(magnitude: Option<f64>) -> f64 {
    let Some(mag) = magnitude.filter(|m| m.is_finite()) else {
        return 4.0;
    };
    let baseline = 2.5;
    baseline + ((mag - 6.0) * 2.0).max(0.0)
}

/// Marker color for a significance score, as a CSS `hsl()` string.
#[must_use]
pub fn significance_to_color(significance: f64) -> String {
    if !significance.is_finite() {
        return UNKNOWN_SIGNIFICANCE_COLOR.to_string();
    }
    let min = f64::from(SIGNIFICANCE_RANGE.min);
    let max = f64::from(SIGNIFICANCE_RANGE.max);
    let ratio = ((significance - min) / (max - min)).clamp(0.0, 1.0);

    let hue_start = 180.0; // blue-green (lower significance)
    let hue_end = 320.0; // magenta (higher significance)
    let hue = hue_start + (hue_end - hue_start) * ratio;
    let saturation = 80.0 + 10.0 * ratio;
    let lightness = 68.0 - 18.0 * ratio;
    format!("hsl({hue:.1}, {saturation:.1}%, {lightness:.1}%)")
}
