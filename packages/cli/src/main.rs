#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the quake map risk analysis.
//!
//! Loads the three datasets from a data directory, then either runs a
//! risk assessment around a city or coordinate (`query`) or writes
//! display-ready `GeoJSON` for a map front end (`export`).

mod export;
mod report;
mod style;

use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use geojson::FeatureCollection;
use quake_map_analysis::{assess_location, filter_events};
use quake_map_analysis_models::{FilterParams, LocationAssessment, RankedEvent};
use quake_map_geo::normalize_longitude;
use quake_map_ingest::{belts, cities, earthquakes};
use quake_map_models::{CityRecord, EventRecord, GeoPoint, MagnitudeBand};

use report::{format_datetime_utc, format_depth, format_distance, format_magnitude};

#[derive(Parser)]
#[command(name = "quake_map_cli", about = "Seismic risk analysis over the quake map datasets")]
struct Cli {
    /// Directory containing `earthquake.json`, `plate_boundaries.geojson`,
    /// and `worldcities.csv`
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a risk assessment around a city or coordinate
    Query {
        /// Center the search on this city (case-insensitive exact name)
        #[arg(long, conflicts_with_all = ["lat", "lng"])]
        city: Option<String>,
        /// Center latitude in degrees
        #[arg(long, requires = "lng")]
        lat: Option<f64>,
        /// Center longitude in degrees
        #[arg(long, requires = "lat")]
        lng: Option<f64>,
        /// Search radius in kilometers
        #[arg(long, default_value = "100")]
        radius: f64,
        /// Comma-separated magnitude bands (e.g. "7-7.9,8+"); all three
        /// when omitted
        #[arg(long)]
        bands: Option<String>,
        /// First year of the inclusive occurrence window
        #[arg(long, default_value = "1990")]
        year_start: i32,
        /// Last year of the inclusive occurrence window
        #[arg(long, default_value = "2023")]
        year_end: i32,
        /// Maximum number of events to list
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Write display-ready `GeoJSON` (world-wrapped belts and styled
    /// event markers)
    Export {
        /// Output file path
        #[arg(long)]
        output: PathBuf,
        /// Center latitude in degrees
        #[arg(long, requires = "lng")]
        lat: Option<f64>,
        /// Center longitude in degrees
        #[arg(long, requires = "lat")]
        lng: Option<f64>,
        /// Search radius in kilometers
        #[arg(long, default_value = "100")]
        radius: f64,
        /// Comma-separated magnitude bands; all three when omitted
        #[arg(long)]
        bands: Option<String>,
        /// First year of the inclusive occurrence window
        #[arg(long, default_value = "1990")]
        year_start: i32,
        /// Last year of the inclusive occurrence window
        #[arg(long, default_value = "2023")]
        year_end: i32,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            city,
            lat,
            lng,
            radius,
            bands,
            year_start,
            year_end,
            limit,
        } => {
            let params = FilterParams {
                radius_km: radius,
                bands: parse_bands(bands.as_deref())?,
                year_start,
                year_end,
                center: None,
            };
            let center = resolve_center(&cli.data_dir, city.as_deref(), lat, lng)?;
            run_query(&cli.data_dir, center, &params, limit)
        }
        Commands::Export {
            output,
            lat,
            lng,
            radius,
            bands,
            year_start,
            year_end,
        } => {
            let center = match (lat, lng) {
                (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, normalize_longitude(lng))),
                _ => None,
            };
            let params = FilterParams {
                radius_km: radius,
                bands: parse_bands(bands.as_deref())?,
                year_start,
                year_end,
                center,
            };
            run_export(&cli.data_dir, &output, &params)
        }
    }
}

fn run_query(
    data_dir: &Path,
    center: Option<GeoPoint>,
    params: &FilterParams,
    limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let (events, belt_collection) = load_datasets(data_dir)?;

    match center {
        Some(center) => {
            let assessment = assess_location(&events, &belt_collection, center, params);
            print_assessment(&assessment, params.radius_km, limit);
        }
        None => {
            let results = filter_events(&events, params);
            println!("{} earthquakes match the current filters.", results.len());
            print_events(&results, limit);
        }
    }
    Ok(())
}

fn run_export(
    data_dir: &Path,
    output: &Path,
    params: &FilterParams,
) -> Result<(), Box<dyn std::error::Error>> {
    let (events, belt_collection) = load_datasets(data_dir)?;
    let results = filter_events(&events, params);
    let collection = export::build_display_collection(&results, &belt_collection);

    let feature_count = collection.features.len();
    serde_json::to_writer(File::create(output)?, &collection)?;
    log::info!("Wrote {feature_count} display features to {}", output.display());
    println!("Wrote {feature_count} features to {}", output.display());
    Ok(())
}

/// Loads the event and belt datasets, logging load sizes and timing.
fn load_datasets(
    data_dir: &Path,
) -> Result<(Vec<EventRecord>, FeatureCollection), Box<dyn std::error::Error>> {
    let started = Instant::now();
    let events = earthquakes::load(open(&data_dir.join("earthquake.json"))?)?;
    let belt_collection = belts::load(open(&data_dir.join("plate_boundaries.geojson"))?)?;
    log::info!("Datasets loaded in {:?}", started.elapsed());
    Ok((events, belt_collection))
}

/// Opens a dataset file for buffered reading.
fn open(path: &Path) -> Result<BufReader<File>, Box<dyn std::error::Error>> {
    let file =
        File::open(path).map_err(|source| format!("failed to open {}: {source}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Resolves the query center from an explicit coordinate or a city name.
fn resolve_center(
    data_dir: &Path,
    city: Option<&str>,
    lat: Option<f64>,
    lng: Option<f64>,
) -> Result<Option<GeoPoint>, Box<dyn std::error::Error>> {
    // Keep user-entered longitudes inside the display window; the wrap
    // is a whole number of world copies, so distances are unchanged.
    if let (Some(lat), Some(lng)) = (lat, lng) {
        return Ok(Some(GeoPoint::new(lat, normalize_longitude(lng))));
    }
    let Some(name) = city else {
        return Ok(None);
    };

    let city_table = cities::load(open(&data_dir.join("worldcities.csv"))?)?;
    let found = find_city(&city_table, name)
        .ok_or_else(|| format!("no city named \"{name}\" in the world cities table"))?;
    println!("Centering on {} ({:.4}, {:.4})", found.display_name, found.lat, found.lng);
    Ok(Some(GeoPoint::new(found.lat, found.lng)))
}

/// Case-insensitive exact match on city or display name; ties broken by
/// population so "Paris" means Paris, France, not Paris, Texas.
fn find_city<'a>(city_table: &'a [CityRecord], name: &str) -> Option<&'a CityRecord> {
    city_table
        .iter()
        .filter(|city| {
            city.name.eq_ignore_ascii_case(name) || city.display_name.eq_ignore_ascii_case(name)
        })
        .max_by_key(|city| city.population.unwrap_or(0))
}

/// Parses a comma-separated band list; `None` selects all three bands.
fn parse_bands(raw: Option<&str>) -> Result<BTreeSet<MagnitudeBand>, Box<dyn std::error::Error>> {
    let Some(raw) = raw else {
        return Ok(MagnitudeBand::all().iter().copied().collect());
    };
    let mut bands = BTreeSet::new();
    for label in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let band = label
            .parse::<MagnitudeBand>()
            .map_err(|_| format!("unknown magnitude band \"{label}\" (expected 6-6.9, 7-7.9, or 8+)"))?;
        bands.insert(band);
    }
    Ok(bands)
}

fn print_assessment(assessment: &LocationAssessment, radius_km: f64, limit: usize) {
    let distance_text = assessment.belt_distance_km.map_or_else(
        || "Distance unavailable".to_string(),
        |d| format!("{} to seismic belt", format_distance(Some(d))),
    );

    println!();
    println!("{}", assessment.risk.label);
    println!("  {}", assessment.risk.description);
    println!("  {distance_text}");
    println!();
    println!("Earthquakes within {radius_km} km   {}", assessment.metrics.count);
    println!(
        "Maximum magnitude           {}",
        format_magnitude(assessment.metrics.max_magnitude)
    );
    println!(
        "Most recent event           {}",
        format_datetime_utc(assessment.metrics.most_recent)
    );
    println!(
        "Tsunami-related events      {}",
        assessment.metrics.tsunami_count
    );
    print_events(&assessment.results, limit);
}

fn print_events(results: &[RankedEvent], limit: usize) {
    if results.is_empty() {
        println!();
        println!("No earthquakes found within the current filters.");
        return;
    }

    println!();
    for ranked in results.iter().take(limit) {
        let event = &ranked.event;
        let mut line = format!(
            "  {}  M {}  depth {}  {}",
            format_datetime_utc(event.occurred_at),
            format_magnitude(event.magnitude),
            format_depth(event.depth_km),
            event.place,
        );
        if !event.region.is_empty() {
            line.push_str(&format!(", {}", event.region));
        }
        if let Some(distance) = ranked.distance_km {
            line.push_str(&format!("  ({})", format_distance(Some(distance))));
        }
        if event.tsunami {
            line.push_str("  [tsunami]");
        }
        println!("{line}");
    }
    if results.len() > limit {
        println!("  ... and {} more", results.len() - limit);
    }
}
