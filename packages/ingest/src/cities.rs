//! World cities loader.
//!
//! Parses the world cities CSV into [`CityRecord`]s for resolving a query
//! center from a city name. Column names vary across table exports, so
//! coordinate columns are located by alias.

use std::io::Read;

use csv::StringRecord;
use quake_map_models::CityRecord;

use crate::{IngestError, labels::normalize_region_label};

/// Loads the world cities table.
///
/// Rows without finite coordinates are skipped; the load only fails when
/// the file itself cannot be read or decoded.
///
/// # Errors
///
/// Returns [`IngestError`] if the reader fails or a record cannot be
/// decoded as CSV.
pub fn load(reader: impl Read) -> Result<Vec<CityRecord>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let name_col = find_column(&headers, &["city_ascii", "city"]);
    let lat_col = find_column(&headers, &["lat", "latitude"]);
    let lng_col = find_column(&headers, &["lng", "longitude"]);
    let admin_col = find_column(&headers, &["admin_name"]);
    let country_col = find_column(&headers, &["country"]);
    let population_col = find_column(&headers, &["population"]);

    let mut cities = Vec::new();
    let mut skipped = 0usize;
    for record in csv_reader.records() {
        let record = record?;
        match normalize_city(
            &record,
            name_col,
            lat_col,
            lng_col,
            admin_col,
            country_col,
            population_col,
        ) {
            Some(city) => cities.push(city),
            None => skipped += 1,
        }
    }

    log::info!("Loaded {} cities ({skipped} skipped)", cities.len());
    Ok(cities)
}

fn normalize_city(
    record: &StringRecord,
    name_col: Option<usize>,
    lat_col: Option<usize>,
    lng_col: Option<usize>,
    admin_col: Option<usize>,
    country_col: Option<usize>,
    population_col: Option<usize>,
) -> Option<CityRecord> {
    let lat = parse_coordinate(field(record, lat_col))?;
    let lng = parse_coordinate(field(record, lng_col))?;

    let name = normalize_region_label(field(record, name_col).trim());
    let region = normalize_region_label(field(record, admin_col).trim());
    let country = normalize_region_label(field(record, country_col).trim());

    let population = field(record, population_col)
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
        .map(|p| p as u64);

    let display_name = display_name(&name, &region, &country);

    Some(CityRecord {
        name,
        region,
        country,
        lat,
        lng,
        population,
        display_name,
    })
}

/// "City, Region, Country" with empty segments dropped and the region
/// segment omitted when it repeats the city name.
fn display_name(name: &str, region: &str, country: &str) -> String {
    let mut segments = vec![name];
    if !region.is_empty() && region != name {
        segments.push(region);
    }
    if !country.is_empty() {
        segments.push(country);
    }
    segments.retain(|segment| !segment.is_empty());
    segments.join(", ")
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn field<'r>(record: &'r StringRecord, column: Option<usize>) -> &'r str {
    column.and_then(|idx| record.get(idx)).unwrap_or("")
}

/// Index of the first header matching any alias, case-insensitively.
fn find_column(headers: &StringRecord, aliases: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        aliases
            .iter()
            .any(|alias| header.trim().eq_ignore_ascii_case(alias))
    })
}
