//! Event selection and recency ranking.

use std::cmp::Reverse;

use quake_map_analysis_models::{FilterParams, RankedEvent};
use quake_map_geo::haversine_km;
use quake_map_models::{EventRecord, MagnitudeBand};

/// Filters events by band, year window, and radius, ranked most recent
/// first.
///
/// Policy, in order: an empty band set yields an empty result (explicit
/// "nothing selected"); events with absent/non-finite magnitude or
/// non-finite coordinates are dropped; the magnitude is bucketed into
/// exactly one band which must be selected; events with a known year
/// outside the (order-insensitive) year window are dropped, unknown years
/// never are; with a center, events beyond the radius are dropped and the
/// survivors carry their computed distance. The sort is stable, so
/// equal-instant events keep input order.
#[must_use]
pub fn filter_events(events: &[EventRecord], params: &FilterParams) -> Vec<RankedEvent> {
    if params.bands.is_empty() {
        return Vec::new();
    }

    let center = params.center.filter(|c| c.is_finite());
    let year_min = params.year_start.min(params.year_end);
    let year_max = params.year_start.max(params.year_end);

    let mut results: Vec<RankedEvent> = events
        .iter()
        .filter_map(|event| {
            let magnitude = event.magnitude.filter(|m| m.is_finite())?;
            if !event.location().is_finite() {
                return None;
            }
            if !params.bands.contains(&MagnitudeBand::for_magnitude(magnitude)) {
                return None;
            }
            if let Some(year) = event.year
                && !(year_min..=year_max).contains(&year)
            {
                return None;
            }

            let mut distance_km = None;
            if let Some(center) = center {
                let distance = haversine_km(center, event.location());
                if distance > params.radius_km {
                    return None;
                }
                distance_km = Some(distance);
            }

            Some(RankedEvent {
                event: event.clone(),
                distance_km,
            })
        })
        .collect();

    results.sort_by_key(|ranked| Reverse(occurrence_millis(ranked)));
    results
}

/// Sort key: occurrence instant in epoch milliseconds, with missing
/// timestamps pinned to the epoch so they rank last.
fn occurrence_millis(ranked: &RankedEvent) -> i64 {
    ranked
        .event
        .occurred_at
        .map_or(0, |instant| instant.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use quake_map_models::GeoPoint;
    use std::collections::BTreeSet;

    fn event(id: &str, lat: f64, lng: f64, magnitude: Option<f64>, year: Option<i32>) -> EventRecord {
        let occurred_at = year.map(|y| Utc.with_ymd_and_hms(y, 3, 11, 5, 46, 0).unwrap());
        EventRecord {
            id: id.to_string(),
            lat,
            lng,
            magnitude,
            depth_km: Some(10.0),
            occurred_at,
            year,
            tsunami: false,
            significance: 600.0,
            place: String::new(),
            region: String::new(),
        }
    }

    fn all_band_params() -> FilterParams {
        FilterParams::default()
    }

    #[test]
    fn empty_band_set_yields_empty_result() {
        let events = vec![event("a", 0.0, 0.0, Some(7.5), Some(2000))];
        let params = FilterParams {
            bands: BTreeSet::new(),
            ..FilterParams::default()
        };
        assert!(filter_events(&events, &params).is_empty());
    }

    #[test]
    fn drops_events_without_finite_magnitude_or_coordinates() {
        let events = vec![
            event("no-mag", 0.0, 0.0, None, Some(2000)),
            event("nan-mag", 0.0, 0.0, Some(f64::NAN), Some(2000)),
            event("nan-lat", f64::NAN, 0.0, Some(7.0), Some(2000)),
            event("ok", 0.0, 0.0, Some(7.0), Some(2000)),
        ];
        let results = filter_events(&events, &all_band_params());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].event.id, "ok");
    }

    #[test]
    fn keeps_only_selected_bands() {
        let events = vec![
            event("six", 0.0, 0.0, Some(6.4), Some(2000)),
            event("seven", 0.0, 1.0, Some(7.4), Some(2000)),
            event("eight", 0.0, 2.0, Some(8.4), Some(2000)),
        ];
        let params = FilterParams {
            bands: [MagnitudeBand::M8Plus].into_iter().collect(),
            ..FilterParams::default()
        };
        let results = filter_events(&events, &params);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].event.id, "eight");
    }

    #[test]
    fn inverted_year_window_is_swapped_not_an_error() {
        let events = vec![
            event("in", 0.0, 0.0, Some(7.0), Some(2005)),
            event("out", 0.0, 1.0, Some(7.0), Some(1980)),
        ];
        let params = FilterParams {
            year_start: 2010,
            year_end: 2000,
            ..FilterParams::default()
        };
        let results = filter_events(&events, &params);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].event.id, "in");
    }

    #[test]
    fn unknown_year_is_never_dropped_by_the_window() {
        let events = vec![event("undated", 0.0, 0.0, Some(7.0), None)];
        let params = FilterParams {
            year_start: 2000,
            year_end: 2001,
            ..FilterParams::default()
        };
        assert_eq!(filter_events(&events, &params).len(), 1);
    }

    #[test]
    fn radius_filtering_attaches_distance() {
        let events = vec![
            event("near", 0.1, 0.0, Some(7.0), Some(2000)),
            event("far", 5.0, 0.0, Some(7.0), Some(2000)),
        ];
        let params = FilterParams {
            center: Some(GeoPoint::new(0.0, 0.0)),
            radius_km: 100.0,
            ..FilterParams::default()
        };
        let results = filter_events(&events, &params);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].event.id, "near");
        let distance = results[0].distance_km.unwrap();
        assert!((distance - 11.1).abs() < 0.5, "got {distance}");
    }

    #[test]
    fn no_center_means_no_spatial_filtering_and_no_distance() {
        let events = vec![event("anywhere", 80.0, 170.0, Some(7.0), Some(2000))];
        let results = filter_events(&events, &all_band_params());
        assert_eq!(results.len(), 1);
        assert!(results[0].distance_km.is_none());
    }

    #[test]
    fn results_are_monotonic_in_radius() {
        let events: Vec<EventRecord> = (0..20)
            .map(|i| {
                event(
                    &format!("eq-{i}"),
                    f64::from(i) * 0.5,
                    0.0,
                    Some(7.0),
                    Some(2000),
                )
            })
            .collect();
        let center = Some(GeoPoint::new(0.0, 0.0));
        let narrow = FilterParams {
            center,
            radius_km: 150.0,
            ..FilterParams::default()
        };
        let wide = FilterParams {
            center,
            radius_km: 600.0,
            ..FilterParams::default()
        };
        let narrow_ids: Vec<String> = filter_events(&events, &narrow)
            .into_iter()
            .map(|r| r.event.id)
            .collect();
        let wide_ids: Vec<String> = filter_events(&events, &wide)
            .into_iter()
            .map(|r| r.event.id)
            .collect();
        assert!(narrow_ids.len() < wide_ids.len());
        assert!(narrow_ids.iter().all(|id| wide_ids.contains(id)));
    }

    #[test]
    fn sorts_most_recent_first_with_undated_last() {
        let events = vec![
            event("old", 0.0, 0.0, Some(7.0), Some(1995)),
            event("undated", 0.0, 1.0, Some(7.0), None),
            event("new", 0.0, 2.0, Some(7.0), Some(2020)),
        ];
        let ids: Vec<String> = filter_events(&events, &all_band_params())
            .into_iter()
            .map(|r| r.event.id)
            .collect();
        assert_eq!(ids, ["new", "old", "undated"]);
    }

    #[test]
    fn tohoku_scenario_survives_every_rule() {
        let center = GeoPoint::new(38.0, 142.5);
        let mut tohoku = event("tohoku", 38.3, 142.4, Some(9.1), Some(2011));
        tohoku.tsunami = true;
        let params = FilterParams {
            center: Some(center),
            radius_km: 100.0,
            ..FilterParams::default()
        };
        let results = filter_events(std::slice::from_ref(&tohoku), &params);
        assert_eq!(results.len(), 1);
        assert_eq!(
            MagnitudeBand::for_magnitude(results[0].event.magnitude.unwrap()),
            MagnitudeBand::M8Plus
        );
        assert!(results[0].distance_km.unwrap() < 100.0);
    }
}
