//! Longitude wrapping and world-copy duplication.
//!
//! The map view spans two adjacent world copies so that geometry crossing
//! the antimeridian renders as one continuous curve instead of jumping
//! from 180° to -180°. Longitudes are kept in the half-open window
//! `[-180, 540)`: the standard range plus 180° of east duplication margin.

use geojson::{Feature, Geometry, Value};

/// Western edge of the display window.
pub const MIN_LONGITUDE: f64 = -180.0;

/// Eastern edge of the display window (exclusive).
pub const MAX_LONGITUDE: f64 = 540.0;

/// Longitude offset between a feature and its world-copy duplicate.
pub const WORLD_COPY_SHIFT_DEGREES: f64 = 360.0;

const WRAP_WIDTH: f64 = MAX_LONGITUDE - MIN_LONGITUDE;

/// Wraps a longitude into the canonical `[-180, 540)` window.
///
/// Idempotent. Non-finite input is returned unchanged; rejecting it is
/// the caller's concern.
#[must_use]
pub fn normalize_longitude(lng: f64) -> f64 {
    if !lng.is_finite() {
        return lng;
    }
    (lng - MIN_LONGITUDE).rem_euclid(WRAP_WIDTH) + MIN_LONGITUDE
}

/// Returns each feature followed by a copy shifted `shift_degrees` east.
///
/// Every coordinate pair in the copy has its longitude increased by
/// `shift_degrees` with the latitude untouched. Features without geometry
/// pass through once, unduplicated. Input is never mutated.
#[must_use]
pub fn duplicate_for_world_wrap(features: &[Feature], shift_degrees: f64) -> Vec<Feature> {
    let mut duplicated = Vec::with_capacity(features.len() * 2);
    for feature in features {
        duplicated.push(feature.clone());
        if let Some(geometry) = &feature.geometry {
            let mut shifted = feature.clone();
            shifted.geometry = Some(shift_geometry(geometry, shift_degrees));
            duplicated.push(shifted);
        }
    }
    duplicated
}

fn shift_geometry(geometry: &Geometry, shift: f64) -> Geometry {
    Geometry {
        bbox: geometry.bbox.clone(),
        value: shift_value(&geometry.value, shift),
        foreign_members: geometry.foreign_members.clone(),
    }
}

fn shift_value(value: &Value, shift: f64) -> Value {
    match value {
        Value::Point(position) => Value::Point(shift_position(position, shift)),
        Value::MultiPoint(positions) => Value::MultiPoint(shift_line(positions, shift)),
        Value::LineString(line) => Value::LineString(shift_line(line, shift)),
        Value::MultiLineString(lines) => Value::MultiLineString(shift_lines(lines, shift)),
        Value::Polygon(rings) => Value::Polygon(shift_lines(rings, shift)),
        Value::MultiPolygon(polygons) => Value::MultiPolygon(
            polygons
                .iter()
                .map(|rings| shift_lines(rings, shift))
                .collect(),
        ),
        Value::GeometryCollection(geometries) => Value::GeometryCollection(
            geometries
                .iter()
                .map(|geometry| shift_geometry(geometry, shift))
                .collect(),
        ),
    }
}

fn shift_lines(lines: &[Vec<Vec<f64>>], shift: f64) -> Vec<Vec<Vec<f64>>> {
    lines.iter().map(|line| shift_line(line, shift)).collect()
}

fn shift_line(line: &[Vec<f64>], shift: f64) -> Vec<Vec<f64>> {
    line.iter()
        .map(|position| shift_position(position, shift))
        .collect()
}

fn shift_position(position: &[f64], shift: f64) -> Vec<f64> {
    let mut shifted = position.to_vec();
    if let Some(lng) = shifted.first_mut()
        && lng.is_finite()
    {
        *lng += shift;
    }
    shifted
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::JsonObject;

    fn line_feature(coords: Vec<Vec<f64>>) -> Feature {
        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::LineString(coords))),
            id: None,
            properties: Some(JsonObject::new()),
            foreign_members: None,
        }
    }

    #[test]
    fn normalize_lands_in_window() {
        for lng in [-1000.0, -540.0, -180.0, 0.0, 179.9, 180.0, 539.9, 540.0, 1234.5] {
            let normalized = normalize_longitude(lng);
            assert!(
                (MIN_LONGITUDE..MAX_LONGITUDE).contains(&normalized),
                "{lng} normalized to {normalized}"
            );
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        for lng in [-725.0, -180.0, 0.0, 359.0, 540.0, 899.9] {
            let once = normalize_longitude(lng);
            assert!((normalize_longitude(once) - once).abs() < 1e-12);
        }
    }

    #[test]
    fn normalize_keeps_in_window_values() {
        assert!((normalize_longitude(170.0) - 170.0).abs() < 1e-12);
        assert!((normalize_longitude(400.0) - 400.0).abs() < 1e-12);
        assert!((normalize_longitude(-190.0) - 530.0).abs() < 1e-12);
        assert!((normalize_longitude(540.0) - -180.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_passes_non_finite_through() {
        assert!(normalize_longitude(f64::NAN).is_nan());
        assert!(normalize_longitude(f64::INFINITY).is_infinite());
    }

    #[test]
    fn duplicates_every_feature_with_geometry() {
        let features = vec![
            line_feature(vec![vec![170.0, 10.0], vec![-175.0, 12.0]]),
            line_feature(vec![vec![0.0, 0.0], vec![1.0, 1.0]]),
        ];
        let duplicated = duplicate_for_world_wrap(&features, WORLD_COPY_SHIFT_DEGREES);
        assert_eq!(duplicated.len(), 4);

        let Some(Value::LineString(original)) =
            duplicated[0].geometry.as_ref().map(|g| g.value.clone())
        else {
            panic!("expected line geometry");
        };
        let Some(Value::LineString(shifted)) =
            duplicated[1].geometry.as_ref().map(|g| g.value.clone())
        else {
            panic!("expected line geometry");
        };
        for (orig, copy) in original.iter().zip(&shifted) {
            assert!((copy[0] - orig[0] - 360.0).abs() < 1e-12);
            assert!((copy[1] - orig[1]).abs() < 1e-12);
        }
    }

    #[test]
    fn features_without_geometry_pass_through_once() {
        let bare = Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: Some(JsonObject::new()),
            foreign_members: None,
        };
        let duplicated = duplicate_for_world_wrap(&[bare], WORLD_COPY_SHIFT_DEGREES);
        assert_eq!(duplicated.len(), 1);
    }

    #[test]
    fn multi_line_coordinates_all_shift() {
        let feature = Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::MultiLineString(vec![
                vec![vec![10.0, 1.0], vec![20.0, 2.0]],
                vec![vec![-170.0, 3.0], vec![175.0, 4.0]],
            ]))),
            id: None,
            properties: None,
            foreign_members: None,
        };
        let duplicated = duplicate_for_world_wrap(std::slice::from_ref(&feature), 360.0);
        assert_eq!(duplicated.len(), 2);
        let Some(Value::MultiLineString(lines)) =
            duplicated[1].geometry.as_ref().map(|g| g.value.clone())
        else {
            panic!("expected multi line geometry");
        };
        assert!((lines[0][0][0] - 370.0).abs() < 1e-12);
        assert!((lines[1][1][0] - 535.0).abs() < 1e-12);
        assert!((lines[1][1][1] - 4.0).abs() < 1e-12);
    }
}
