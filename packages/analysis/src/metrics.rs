//! Aggregate statistics over a filtered result set.

use quake_map_analysis_models::{QueryMetrics, RankedEvent};

/// Reduces a result set to its summary statistics in one pass.
///
/// Empty input yields [`QueryMetrics::empty`]. The maximum magnitude only
/// considers finite magnitudes and stays absent when none are present;
/// the most recent instant stays absent when no event carries a
/// timestamp.
#[must_use]
pub fn aggregate(results: &[RankedEvent]) -> QueryMetrics {
    let mut metrics = QueryMetrics::empty();
    for ranked in results {
        let event = &ranked.event;
        metrics.count += 1;
        if let Some(magnitude) = event.magnitude.filter(|m| m.is_finite()) {
            metrics.max_magnitude = Some(
                metrics
                    .max_magnitude
                    .map_or(magnitude, |current| current.max(magnitude)),
            );
        }
        if let Some(instant) = event.occurred_at {
            metrics.most_recent = Some(
                metrics
                    .most_recent
                    .map_or(instant, |current| current.max(instant)),
            );
        }
        if event.tsunami {
            metrics.tsunami_count += 1;
        }
    }
    metrics
}
