//! Great-circle distances: point to point, and point to belt polylines.
//!
//! The belt distance is the minimum over every consecutive vertex pair of
//! every line geometry in the collection. Each segment applies the clamped
//! nearest-point rule: cross-track distance to the segment's great circle
//! when the projection falls within the segment's angular span, distance
//! to the nearer endpoint otherwise.

use geojson::{FeatureCollection, Value};
use quake_map_models::GeoPoint;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometers.
///
/// Symmetric, non-negative, and zero only for coincident points (within
/// floating tolerance). The half-angle formulation stays numerically
/// stable for both tiny and near-antipodal separations.
#[must_use]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    EARTH_RADIUS_KM * central_angle(a, b)
}

/// Angular separation between two points, in radians.
fn central_angle(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Initial bearing from one point toward another, in radians.
fn initial_bearing(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lng = (to.lng - from.lng).to_radians();
    let y = d_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos();
    y.atan2(x)
}

/// Distance from a point to a great-circle segment, in kilometers.
///
/// Cross-track distance when the along-track projection lies within the
/// segment; otherwise the distance to the nearer endpoint. Zero-length
/// segments collapse to plain point distance.
fn point_to_segment_km(point: GeoPoint, start: GeoPoint, end: GeoPoint) -> f64 {
    let to_point = central_angle(start, point);
    if to_point == 0.0 {
        return 0.0;
    }
    let span = central_angle(start, end);
    if span == 0.0 {
        return to_point * EARTH_RADIUS_KM;
    }

    let relative_bearing = initial_bearing(start, point) - initial_bearing(start, end);
    if relative_bearing.cos() < 0.0 {
        // Projection falls before the start of the segment.
        return to_point * EARTH_RADIUS_KM;
    }

    let cross_track = (to_point.sin() * relative_bearing.sin()).asin();
    let along_track = (to_point.cos() / cross_track.cos()).clamp(-1.0, 1.0).acos();
    if along_track > span {
        return haversine_km(point, end);
    }
    cross_track.abs() * EARTH_RADIUS_KM
}

/// Minimum distance from a point to any belt polyline, in kilometers.
///
/// Scans every segment of every `LineString` and `MultiLineString` in the
/// collection, including inside nested geometry collections. Non-line
/// geometry is skipped. Returns `None` when the collection holds no line
/// segments at all.
#[must_use]
pub fn min_distance_to_belts(point: GeoPoint, belts: &FeatureCollection) -> Option<f64> {
    let mut best: Option<f64> = None;
    for feature in &belts.features {
        if let Some(geometry) = &feature.geometry {
            scan_value(point, &geometry.value, &mut best);
        }
    }
    best
}

fn scan_value(point: GeoPoint, value: &Value, best: &mut Option<f64>) {
    match value {
        Value::LineString(line) => scan_polyline(point, line, best),
        Value::MultiLineString(lines) => {
            for line in lines {
                scan_polyline(point, line, best);
            }
        }
        Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                scan_value(point, &geometry.value, best);
            }
        }
        _ => {}
    }
}

fn scan_polyline(point: GeoPoint, line: &[Vec<f64>], best: &mut Option<f64>) {
    for pair in line.windows(2) {
        let (Some(start), Some(end)) = (position_point(&pair[0]), position_point(&pair[1])) else {
            continue;
        };
        let distance = point_to_segment_km(point, start, end);
        if distance.is_finite() && best.is_none_or(|current| distance < current) {
            *best = Some(distance);
        }
    }
}

/// GeoJSON positions are (lng, lat) order.
fn position_point(position: &[f64]) -> Option<GeoPoint> {
    match position {
        [lng, lat, ..] if lng.is_finite() && lat.is_finite() => Some(GeoPoint::new(*lat, *lng)),
        _ => None,
    }
}
