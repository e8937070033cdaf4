//! Earthquake event loader.
//!
//! Parses the earthquake `GeoJSON` `FeatureCollection` and normalizes
//! each feature into an [`EventRecord`]. The source files disagree on
//! field naming across vintages (`magnitudo`/`mag`/`magnitude`,
//! `date`/`time`, `ID`/`id`), so every alias is tried in order of
//! preference, matching what the upstream datasets actually ship.

use std::io::Read;

use chrono::{DateTime, Datelike as _, NaiveDate, NaiveDateTime, Utc};
use geojson::{Feature, FeatureCollection, GeoJson, Value};
use quake_map_models::EventRecord;
use serde_json::Map;

use crate::{IngestError, labels::normalize_region_label};

/// Loads and normalizes the earthquake dataset.
///
/// Features without a point geometry or finite coordinates are skipped
/// with a warning; one corrupt row never fails the load.
///
/// # Errors
///
/// Returns [`IngestError`] if the reader fails or the content is not a
/// `GeoJSON` feature collection.
pub fn load(reader: impl Read) -> Result<Vec<EventRecord>, IngestError> {
    let geojson: GeoJson = serde_json::from_reader(reader)?;
    let collection = FeatureCollection::try_from(geojson)?;

    let total = collection.features.len();
    let events: Vec<EventRecord> = collection
        .features
        .iter()
        .enumerate()
        .filter_map(|(index, feature)| {
            let event = normalize_event(feature, index);
            if event.is_none() {
                log::warn!("Skipping earthquake feature {index}: no usable coordinates");
            }
            event
        })
        .collect();

    log::info!(
        "Loaded {} earthquake events ({} skipped)",
        events.len(),
        total - events.len()
    );
    Ok(events)
}

/// Normalizes one source feature into an [`EventRecord`].
fn normalize_event(feature: &Feature, index: usize) -> Option<EventRecord> {
    let (lng, lat) = point_coordinates(feature)?;

    let empty = Map::new();
    let props = feature.properties.as_ref().unwrap_or(&empty);

    let occurred_at = prop_str(props, &["date", "time"]).and_then(parse_event_timestamp);
    let id = prop_id(props).unwrap_or_else(|| format!("eq-{index}"));
    let place = prop_str(props, &["place"]).map_or_else(
        || "Unknown location".to_string(),
        |label| normalize_region_label(&label),
    );
    let region = prop_str(props, &["state", "country"])
        .map_or_else(String::new, |label| normalize_region_label(&label));

    Some(EventRecord {
        id,
        lat,
        lng,
        magnitude: prop_f64(props, &["magnitudo", "mag", "magnitude"]),
        depth_km: prop_f64(props, &["depth"]),
        occurred_at,
        year: occurred_at.map(|at| at.year()),
        tsunami: prop_f64(props, &["tsunami"]).is_some_and(|flag| flag == 1.0),
        significance: prop_f64(props, &["significance", "sig"]).unwrap_or(0.0),
        place,
        region,
    })
}

/// Extracts (lng, lat) from a point geometry, rejecting non-finite values.
fn point_coordinates(feature: &Feature) -> Option<(f64, f64)> {
    let geometry = feature.geometry.as_ref()?;
    let Value::Point(position) = &geometry.value else {
        return None;
    };
    match position.as_slice() {
        [lng, lat, ..] if lng.is_finite() && lat.is_finite() => Some((*lng, *lat)),
        _ => None,
    }
}

/// Parses an occurrence timestamp: ISO 8601 with offset, or a naive
/// datetime (`T` or space separated, optional fractional seconds), or a
/// bare date, all taken as UTC.
fn parse_event_timestamp(s: String) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(s) {
        return Some(with_offset.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// First present identifier property, stringified.
fn prop_id(props: &Map<String, serde_json::Value>) -> Option<String> {
    for key in ["ID", "id"] {
        match props.get(key) {
            Some(serde_json::Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(serde_json::Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// First present property among `keys`, coerced to a finite f64. A key
/// that is present but unparseable masks later aliases, matching the
/// original loader's coalescing.
fn prop_f64(props: &Map<String, serde_json::Value>, keys: &[&str]) -> Option<f64> {
    let value = keys
        .iter()
        .find_map(|key| props.get(*key).filter(|v| !v.is_null()))?;
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// First present non-empty string property among `keys`.
fn prop_str(props: &Map<String, serde_json::Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        props
            .get(*key)
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_str(json: &str) -> Vec<EventRecord> {
        load(json.as_bytes()).unwrap()
    }

    #[test]
    fn normalizes_a_full_feature() {
        let events = load_str(
            r#"{
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [142.4, 38.3]},
                    "properties": {
                        "ID": "usp000hvnu",
                        "magnitudo": 9.1,
                        "depth": 29.0,
                        "tsunami": 1,
                        "significance": 1200,
                        "place": "off the east coast of Honshu",
                        "state": "Japan",
                        "date": "2011-03-11T05:46:24.120Z"
                    }
                }]
            }"#,
        );
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.id, "usp000hvnu");
        assert!((event.lat - 38.3).abs() < f64::EPSILON);
        assert!((event.lng - 142.4).abs() < f64::EPSILON);
        assert!((event.magnitude.unwrap() - 9.1).abs() < f64::EPSILON);
        assert!(event.tsunami);
        assert_eq!(event.year, Some(2011));
        assert_eq!(event.region, "Japan");
    }

    #[test]
    fn skips_features_without_usable_coordinates() {
        let events = load_str(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature", "geometry": null, "properties": {"mag": 7.0}},
                    {
                        "type": "Feature",
                        "geometry": {"type": "Point", "coordinates": [10.0, 20.0]},
                        "properties": {"mag": 7.0}
                    }
                ]
            }"#,
        );
        assert_eq!(events.len(), 1);
        assert!((events[0].lng - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn falls_back_to_synthetic_ids_and_alias_fields() {
        let events = load_str(
            r#"{
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
                    "properties": {"mag": "6.5", "time": "1990-06-16 12:35:45", "sig": 600}
                }]
            }"#,
        );
        let event = &events[0];
        assert_eq!(event.id, "eq-0");
        assert!((event.magnitude.unwrap() - 6.5).abs() < f64::EPSILON);
        assert_eq!(event.year, Some(1990));
        assert!((event.significance - 600.0).abs() < f64::EPSILON);
        assert_eq!(event.place, "Unknown location");
    }

    #[test]
    fn missing_magnitude_and_date_stay_absent() {
        let events = load_str(
            r#"{
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
                    "properties": {}
                }]
            }"#,
        );
        let event = &events[0];
        assert!(event.magnitude.is_none());
        assert!(event.occurred_at.is_none());
        assert!(event.year.is_none());
        assert!(!event.tsunami);
    }

    #[test]
    fn taiwan_labels_are_normalized_at_load() {
        let events = load_str(
            r#"{
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [121.0, 23.7]},
                    "properties": {"mag": 7.1, "place": "Taiwan Strait", "state": "Taiwan"}
                }]
            }"#,
        );
        assert_eq!(events[0].place, "Taiwan, China Strait");
        assert_eq!(events[0].region, "Taiwan, China");
    }

    #[test]
    fn timestamp_formats_all_parse() {
        assert!(parse_event_timestamp("2011-03-11T05:46:24.120Z".to_string()).is_some());
        assert!(parse_event_timestamp("2011-03-11T05:46:24".to_string()).is_some());
        assert!(parse_event_timestamp("2011-03-11 05:46:24".to_string()).is_some());
        assert!(parse_event_timestamp("2011-03-11".to_string()).is_some());
        assert!(parse_event_timestamp("not-a-date".to_string()).is_none());
    }
}
