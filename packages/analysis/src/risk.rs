//! Risk classification from belt distance and regional activity.

use quake_map_analysis_models::{RiskAssessment, RiskLevel};

/// Belt distance at or below which a location is high risk, in kilometers.
pub const HIGH_RISK_BELT_KM: f64 = 50.0;

/// Belt distance at or below which a location is at least moderate risk,
/// in kilometers.
pub const MEDIUM_RISK_BELT_KM: f64 = 200.0;

/// Wide-radius event count above which a belt-distant location is still
/// rated moderate.
pub const ELEVATED_ACTIVITY_COUNT: u64 = 5;

/// Radius for the regional-activity count, in kilometers. Always at least
/// this wide regardless of the display radius; the two radii are
/// deliberately distinct.
pub const WIDE_RADIUS_KM: f64 = 300.0;

/// Classifies a location's risk tier. Total over all inputs.
///
/// An absent or non-finite belt distance is the first-class "unknown"
/// state, not an error.
#[must_use]
pub fn classify(belt_distance_km: Option<f64>, wide_radius_count: u64) -> RiskAssessment {
    let Some(distance) = belt_distance_km.filter(|d| d.is_finite()) else {
        return RiskAssessment {
            level: RiskLevel::Unknown,
            label: "Risk unknown".to_string(),
            description: "Unable to determine distance to a seismic belt.".to_string(),
        };
    };

    if distance <= HIGH_RISK_BELT_KM {
        RiskAssessment {
            level: RiskLevel::High,
            label: "High risk".to_string(),
            description: "Within 50 km of a seismic belt".to_string(),
        }
    } else if distance <= MEDIUM_RISK_BELT_KM {
        RiskAssessment {
            level: RiskLevel::Medium,
            label: "Moderate risk".to_string(),
            description: "Between 50 km and 200 km from a seismic belt".to_string(),
        }
    } else if wide_radius_count > ELEVATED_ACTIVITY_COUNT {
        RiskAssessment {
            level: RiskLevel::Medium,
            label: "Moderate risk".to_string(),
            description: "More than 200 km from a seismic belt, but the 300 km radius shows elevated activity".to_string(),
        }
    } else {
        RiskAssessment {
            level: RiskLevel::Low,
            label: "Lower risk".to_string(),
            description: "More than 200 km from a seismic belt".to_string(),
        }
    }
}
