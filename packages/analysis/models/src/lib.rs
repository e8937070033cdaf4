#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Query and result types for the analysis pipeline.
//!
//! These are the transient values that flow through a single query: the
//! filter parameters built from UI state, the ranked result copies, the
//! aggregate metrics, and the derived risk assessment. None of them are
//! ever written back to the canonical event records.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use quake_map_models::{EventRecord, GeoPoint, MagnitudeBand};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Parameters for one filter/assessment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    /// Search radius in kilometers around the center.
    pub radius_km: f64,
    /// Magnitude bands to include. Empty means "nothing selected" and
    /// yields an empty result, distinct from "no matches".
    pub bands: BTreeSet<MagnitudeBand>,
    /// First year of the inclusive occurrence window.
    pub year_start: i32,
    /// Last year of the inclusive occurrence window. May be below
    /// `year_start`; the filter treats the window as `[min, max]`.
    pub year_end: i32,
    /// Query center. `None` disables spatial filtering entirely.
    pub center: Option<GeoPoint>,
}

impl Default for FilterParams {
    /// The dashboard's initial state: 100 km, all bands, 1990-2023,
    /// no center.
    fn default() -> Self {
        Self {
            radius_km: 100.0,
            bands: MagnitudeBand::all().iter().copied().collect(),
            year_start: 1990,
            year_end: 2023,
            center: None,
        }
    }
}

/// An event that survived filtering, with its per-query derived distance.
///
/// This is a transient copy; the canonical [`EventRecord`] is immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEvent {
    /// The matched event.
    pub event: EventRecord,
    /// Great-circle distance from the query center, absent when the query
    /// had no center.
    pub distance_km: Option<f64>,
}

/// Aggregate statistics over one result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryMetrics {
    /// Number of events in the result set.
    pub count: u64,
    /// Maximum finite magnitude present, if any.
    pub max_magnitude: Option<f64>,
    /// Latest occurrence instant present, if any.
    pub most_recent: Option<DateTime<Utc>>,
    /// Number of events with the tsunami flag set.
    pub tsunami_count: u64,
}

impl QueryMetrics {
    /// Metrics for an empty result set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            count: 0,
            max_magnitude: None,
            most_recent: None,
            tsunami_count: 0,
        }
    }
}

/// Discrete risk tier derived from belt distance and regional activity.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RiskLevel {
    /// Belt distance could not be determined.
    Unknown,
    /// Far from any belt, quiet region.
    Low,
    /// Near a belt, or distant but regionally active.
    Medium,
    /// Within the high-risk belt distance.
    High,
}

/// A derived risk classification. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Discrete tier.
    pub level: RiskLevel,
    /// Short human label (e.g. "High risk").
    pub label: String,
    /// One-line rationale for the tier.
    pub description: String,
}

/// Everything computed for one search center in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationAssessment {
    /// The query center the assessment was run for.
    pub center: GeoPoint,
    /// Events within the display radius, most recent first.
    pub results: Vec<RankedEvent>,
    /// Aggregate statistics over `results`.
    pub metrics: QueryMetrics,
    /// Minimum distance from the center to any seismic belt.
    pub belt_distance_km: Option<f64>,
    /// Event count within the wide heuristic radius (not the display
    /// radius); feeds the risk classification only.
    pub wide_radius_count: u64,
    /// The derived risk classification.
    pub risk: RiskAssessment,
}
