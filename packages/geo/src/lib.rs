#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Spherical geometry for the quake map.
//!
//! Everything here works on the great-circle model (sphere of radius
//! 6371 km); no other projection is supported. The two concerns are
//! longitude bookkeeping for continuous cross-antimeridian display
//! ([`wrap`]) and distance computation ([`distance`]): point-to-point
//! haversine and minimum point-to-belt distance over polyline segments.

pub mod distance;
pub mod wrap;

pub use distance::{EARTH_RADIUS_KM, haversine_km, min_distance_to_belts};
pub use wrap::{WORLD_COPY_SHIFT_DEGREES, duplicate_for_world_wrap, normalize_longitude};
