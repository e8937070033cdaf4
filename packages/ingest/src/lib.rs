#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Dataset loading and one-time normalization.
//!
//! Three loaders, one per source file: earthquake events (`GeoJSON`),
//! plate boundaries (`GeoJSON`), and world cities (CSV). Validation
//! happens here once; analysis code downstream receives fully typed,
//! already-validated collections. Individual malformed rows and features
//! are skipped with a warning, never failing the whole load — only an
//! unreadable or undecodable file is an error.

pub mod belts;
pub mod cities;
pub mod earthquakes;
pub mod labels;

use thiserror::Error;

/// Errors that can occur while loading a dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    /// File read failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON was not the expected `GeoJSON` shape.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// CSV decoding failed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}
