#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Shared domain types for the quake map workspace.
//!
//! This crate defines the canonical earthquake event record, the magnitude
//! band taxonomy used for categorical filtering, and the populated-place
//! lookup row. All loaders normalize their source data into these types
//! once, at ingestion; analysis code never re-validates fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A WGS84 coordinate pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a new point from latitude and longitude in degrees.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Discrete magnitude buckets used for categorical filtering.
///
/// The dashboard's query model only exposes these three bands; magnitudes
/// below 6.0 fold into the lowest band rather than getting a band of their
/// own.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum MagnitudeBand {
    /// Magnitude below 7.0.
    #[serde(rename = "6-6.9")]
    #[strum(serialize = "6-6.9")]
    M6,
    /// Magnitude in [7.0, 8.0).
    #[serde(rename = "7-7.9")]
    #[strum(serialize = "7-7.9")]
    M7,
    /// Magnitude 8.0 and above.
    #[serde(rename = "8+")]
    #[strum(serialize = "8+")]
    M8Plus,
}

impl MagnitudeBand {
    /// Buckets a finite magnitude into exactly one band.
    #[must_use]
    pub fn for_magnitude(mag: f64) -> Self {
        if mag >= 8.0 {
            Self::M8Plus
        } else if mag >= 7.0 {
            Self::M7
        } else {
            Self::M6
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::M6, Self::M7, Self::M8Plus]
    }
}

/// A single earthquake event as loaded from the source dataset.
///
/// Constructed once at load time and never mutated; per-query derived
/// fields (distance to a search center) live on transient result copies,
/// not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Stable identifier, unique within a load. Synthetic (`eq-{index}`)
    /// when the source row had none.
    pub id: String,
    /// Latitude in degrees. Finite for every loaded record.
    pub lat: f64,
    /// Longitude in degrees. Finite for every loaded record.
    pub lng: f64,
    /// Moment magnitude, if the source reported one.
    pub magnitude: Option<f64>,
    /// Hypocenter depth in kilometers.
    pub depth_km: Option<f64>,
    /// Occurrence instant in UTC.
    pub occurred_at: Option<DateTime<Utc>>,
    /// UTC year of occurrence, derived from `occurred_at` at ingest.
    pub year: Option<i32>,
    /// Whether the event triggered a tsunami.
    pub tsunami: bool,
    /// USGS significance score.
    pub significance: f64,
    /// Free-text locality label (e.g. "off the east coast of Honshu").
    pub place: String,
    /// Free-text region/country label.
    pub region: String,
}

impl EventRecord {
    /// The event's coordinates as a [`GeoPoint`].
    #[must_use]
    pub const fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// A populated place row from the world cities table, used to resolve a
/// query center from a city name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityRecord {
    /// ASCII city name.
    pub name: String,
    /// Administrative region (state/province), if any.
    pub region: String,
    /// Country name.
    pub country: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Population estimate, if known.
    pub population: Option<u64>,
    /// "City, Region, Country" label with the region segment dropped when
    /// it repeats the city name.
    pub display_name: String,
}

/// Bounds of the significance color ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignificanceRange {
    /// Ramp floor; scores at or below render as the coolest color.
    pub min: u32,
    /// Ramp midpoint, used for legend labels.
    pub mid: u32,
    /// Ramp ceiling; scores at or above render as the hottest color.
    pub max: u32,
}

/// Significance score range observed across the dataset, driving the
/// marker color ramp and its legend.
pub const SIGNIFICANCE_RANGE: SignificanceRange = SignificanceRange {
    min: 550,
    mid: 875,
    max: 1200,
};
