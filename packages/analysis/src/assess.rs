//! Per-search orchestration: filter, metrics, belt distance, risk.

use geojson::FeatureCollection;
use quake_map_analysis_models::{FilterParams, LocationAssessment};
use quake_map_geo::min_distance_to_belts;
use quake_map_models::{EventRecord, GeoPoint};

use crate::{aggregate, classify, filter_events, risk::WIDE_RADIUS_KM};

/// Runs the full assessment for one search center.
///
/// The displayed result list uses the caller's radius; the risk heuristic
/// re-runs the filter with `max(radius, WIDE_RADIUS_KM)` and only its
/// count feeds the classifier. Pure; safe to call concurrently.
#[must_use]
pub fn assess_location(
    events: &[EventRecord],
    belts: &FeatureCollection,
    center: GeoPoint,
    params: &FilterParams,
) -> LocationAssessment {
    let scoped = FilterParams {
        center: Some(center),
        ..params.clone()
    };
    let results = filter_events(events, &scoped);
    let metrics = aggregate(&results);

    let belt_distance_km = min_distance_to_belts(center, belts);
    let wide = FilterParams {
        radius_km: scoped.radius_km.max(WIDE_RADIUS_KM),
        ..scoped.clone()
    };
    let wide_radius_count = filter_events(events, &wide).len() as u64;
    let risk = classify(belt_distance_km, wide_radius_count);

    LocationAssessment {
        center,
        results,
        metrics,
        belt_distance_km,
        wide_radius_count,
        risk,
    }
}
