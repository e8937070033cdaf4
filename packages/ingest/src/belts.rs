//! Plate boundary (seismic belt) loader.

use std::io::Read;

use geojson::{FeatureCollection, GeoJson, Value};

use crate::IngestError;

/// Loads the plate-boundary dataset, keeping only features with line
/// content.
///
/// Belt geometry is polylines by contract; anything else in the file is
/// dropped with a warning rather than treated as an error. Descriptive
/// attributes (name, type, source) pass through untouched for display.
///
/// # Errors
///
/// Returns [`IngestError`] if the reader fails or the content is not a
/// `GeoJSON` feature collection.
pub fn load(reader: impl Read) -> Result<FeatureCollection, IngestError> {
    let geojson: GeoJson = serde_json::from_reader(reader)?;
    let mut collection = FeatureCollection::try_from(geojson)?;

    let total = collection.features.len();
    collection.features.retain(|feature| {
        let keep = feature
            .geometry
            .as_ref()
            .is_some_and(|geometry| has_line_content(&geometry.value));
        if !keep {
            log::warn!(
                "Dropping non-line boundary feature: {}",
                feature
                    .property("Name")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("<unnamed>")
            );
        }
        keep
    });

    log::info!(
        "Loaded {} seismic belt features ({} dropped)",
        collection.features.len(),
        total - collection.features.len()
    );
    Ok(collection)
}

/// Whether a geometry contains any `LineString`/`MultiLineString`,
/// including nested inside geometry collections.
fn has_line_content(value: &Value) -> bool {
    match value {
        Value::LineString(_) | Value::MultiLineString(_) => true,
        Value::GeometryCollection(geometries) => geometries
            .iter()
            .any(|geometry| has_line_content(&geometry.value)),
        _ => false,
    }
}
