//! Display-ready GeoJSON export.
//!
//! Produces what the map front end renders directly: belts and filtered
//! event markers, each followed by its +360° world-copy duplicate so
//! geometry crossing the antimeridian draws as one continuous curve, with
//! per-feature style properties precomputed.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use quake_map_analysis_models::RankedEvent;
use quake_map_geo::{WORLD_COPY_SHIFT_DEGREES, duplicate_for_world_wrap};

use crate::report::format_belt_name;
use crate::style::{magnitude_to_radius, significance_to_color};

/// Builds the combined display collection: world-wrapped belts first,
/// then world-wrapped styled event markers.
#[must_use]
pub fn build_display_collection(
    results: &[RankedEvent],
    belts: &FeatureCollection,
) -> FeatureCollection {
    let belt_features: Vec<Feature> = belts.features.iter().map(belt_feature).collect();
    let event_features: Vec<Feature> = results.iter().map(event_feature).collect();

    let mut features = duplicate_for_world_wrap(&belt_features, WORLD_COPY_SHIFT_DEGREES);
    features.extend(duplicate_for_world_wrap(
        &event_features,
        WORLD_COPY_SHIFT_DEGREES,
    ));

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Clones a belt feature and attaches its cleaned display name.
fn belt_feature(feature: &Feature) -> Feature {
    let raw_name = feature
        .property("Name")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("");
    let mut cloned = feature.clone();
    let properties = cloned.properties.get_or_insert_with(JsonObject::new);
    properties.insert(
        "displayName".to_string(),
        serde_json::Value::String(format_belt_name(raw_name)),
    );
    cloned
}

/// Builds a styled point feature for one ranked event.
fn event_feature(ranked: &RankedEvent) -> Feature {
    let event = &ranked.event;
    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), serde_json::json!(event.id));
    properties.insert("mag".to_string(), serde_json::json!(event.magnitude));
    properties.insert("depth".to_string(), serde_json::json!(event.depth_km));
    properties.insert("place".to_string(), serde_json::json!(event.place));
    properties.insert("state".to_string(), serde_json::json!(event.region));
    properties.insert(
        "dateISO".to_string(),
        serde_json::json!(event.occurred_at.map(|at| at.to_rfc3339())),
    );
    properties.insert("year".to_string(), serde_json::json!(event.year));
    properties.insert("hasTsunami".to_string(), serde_json::json!(event.tsunami));
    properties.insert(
        "significance".to_string(),
        serde_json::json!(event.significance),
    );
    properties.insert(
        "distanceKm".to_string(),
        serde_json::json!(ranked.distance_km),
    );
    properties.insert(
        "markerRadius".to_string(),
        serde_json::json!(magnitude_to_radius(event.magnitude)),
    );
    properties.insert(
        "markerColor".to_string(),
        serde_json::json!(significance_to_color(event.significance)),
    );

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![event.lng, event.lat]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
