#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV loaders for the fire-history, climate, and recovery source tables.
//!
//! Loading happens once per session; the resulting [`DataContext`] is
//! immutable and passed by reference into every derivation. Malformed
//! rows are skipped and counted, never fatal; a file that cannot be read
//! at all is an error surfaced by the binary.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use wildfire_atlas_climate_models::ClimateObservation;
use wildfire_atlas_fire_models::{FireCause, FireRecord};
use wildfire_atlas_property_models::{PropertyRecord, RebuildRecord};

/// File name of the statewide fire-history export.
pub const FIRE_HISTORY_FILE: &str = "fire_history.csv";

/// Directory of per-year NFDRS/gridMET daily exports.
pub const CLIMATE_DIR: &str = "nfdrs";

/// File name of the destroyed-homes table.
pub const BURNT_HOMES_FILE: &str = "ALL_burnt_homes.csv";

/// File name of the rebuilt-homes table.
pub const RECOVERED_HOMES_FILE: &str = "ALL_recovered_homes.csv";

/// Errors that can occur while loading source tables.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The file or directory could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The CSV structure itself is broken (not a row-level problem).
    #[error("failed to parse {path}: {source}")]
    Csv {
        /// Path that failed.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },
}

/// All source tables, loaded once and read-only for the session.
#[derive(Debug, Clone, Default)]
pub struct DataContext {
    /// Statewide fire-history records.
    pub fires: Vec<FireRecord>,
    /// Daily climate observations, ordered by date ascending.
    pub climate: Vec<ClimateObservation>,
    /// Destroyed parcels from the Santa Rosa fire.
    pub destroyed: Vec<PropertyRecord>,
    /// Parcels with rebuild activity on record.
    pub rebuilt: Vec<RebuildRecord>,
}

impl DataContext {
    /// Loads every source table from the conventional layout under
    /// `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError`] when a file or the climate directory
    /// cannot be read or parsed at the structural level.
    pub fn load(data_dir: &Path) -> Result<Self, IngestError> {
        let fires = load_fire_history(&data_dir.join(FIRE_HISTORY_FILE))?;
        let climate = load_climate_daily(&data_dir.join(CLIMATE_DIR))?;
        let destroyed = load_destroyed_homes(&data_dir.join(BURNT_HOMES_FILE))?;
        let rebuilt = load_rebuilt_homes(&data_dir.join(RECOVERED_HOMES_FILE))?;

        log::info!(
            "loaded {} fires, {} climate days, {} destroyed / {} rebuilt parcels",
            fires.len(),
            climate.len(),
            destroyed.len(),
            rebuilt.len(),
        );

        Ok(Self {
            fires,
            climate,
            destroyed,
            rebuilt,
        })
    }
}

/// Raw fire-history row with the source export's column names.
#[derive(Debug, Deserialize)]
struct FireRow {
    #[serde(rename = "YEAR_")]
    year: String,
    #[serde(rename = "CAUSE")]
    cause: String,
    #[serde(rename = "GIS_ACRES")]
    gis_acres: String,
}

/// Loads the statewide fire-history export.
///
/// Blank years load as `None` (the aggregator skips them); cause codes
/// outside the taxonomy load as `None`; rows without a usable acreage
/// are skipped.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be opened or read.
pub fn load_fire_history(path: &Path) -> Result<Vec<FireRecord>, IngestError> {
    let mut reader = open(path)?;

    let mut records = Vec::new();
    let mut skipped = 0_usize;
    for row in reader.deserialize::<FireRow>() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                log::warn!("skipping malformed fire row: {err}");
                skipped += 1;
                continue;
            }
        };

        let Some(burned_acres) = parse_float(&row.gis_acres) else {
            skipped += 1;
            continue;
        };

        records.push(FireRecord {
            year: parse_year(&row.year),
            cause: parse_cause(&row.cause),
            burned_acres,
        });
    }

    if skipped > 0 {
        log::warn!("{skipped} fire rows skipped in {}", path.display());
    }
    Ok(records)
}

/// Raw daily climate row (`date`, `bi`, `fm100`).
#[derive(Debug, Deserialize)]
struct ClimateRow {
    date: String,
    bi: f64,
    fm100: f64,
}

/// Loads every per-year CSV in `dir` and returns the concatenated
/// observations sorted by date.
///
/// # Errors
///
/// Returns [`IngestError`] if the directory or any file in it cannot be
/// read.
pub fn load_climate_daily(dir: &Path) -> Result<Vec<ClimateObservation>, IngestError> {
    let entries = std::fs::read_dir(dir).map_err(|source| IngestError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    paths.sort();

    let mut observations = Vec::new();
    let mut skipped = 0_usize;
    for path in &paths {
        let mut reader = open(path)?;
        for row in reader.deserialize::<ClimateRow>() {
            let row = match row {
                Ok(row) => row,
                Err(err) => {
                    log::warn!("skipping malformed climate row: {err}");
                    skipped += 1;
                    continue;
                }
            };
            let Ok(date) = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d") else {
                skipped += 1;
                continue;
            };
            observations.push(ClimateObservation {
                date,
                fire_danger_index: row.bi,
                dead_fuel_moisture_100h: row.fm100,
            });
        }
    }

    // Order by the time key, not file position.
    observations.sort_by_key(|obs| obs.date);

    if skipped > 0 {
        log::warn!("{skipped} climate rows skipped in {}", dir.display());
    }
    log::info!(
        "loaded {} climate observations from {} files",
        observations.len(),
        paths.len(),
    );
    Ok(observations)
}

/// Raw destroyed-home row.
#[derive(Debug, Deserialize)]
struct BurntRow {
    address: String,
    lat: f64,
    lon: f64,
    zestimate: f64,
}

/// Loads the destroyed-homes table.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be opened or read.
pub fn load_destroyed_homes(path: &Path) -> Result<Vec<PropertyRecord>, IngestError> {
    let mut reader = open(path)?;

    let mut records = Vec::new();
    let mut skipped = 0_usize;
    for row in reader.deserialize::<BurntRow>() {
        match row {
            Ok(row) => records.push(PropertyRecord {
                address: row.address,
                latitude: row.lat,
                longitude: row.lon,
                assessed_value: row.zestimate,
            }),
            Err(err) => {
                log::warn!("skipping malformed home row: {err}");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        log::warn!("{skipped} home rows skipped in {}", path.display());
    }
    Ok(records)
}

/// Raw rebuilt-home row (address only).
#[derive(Debug, Deserialize)]
struct RebuiltRow {
    address: String,
}

/// Loads the rebuilt-homes table.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be opened or read.
pub fn load_rebuilt_homes(path: &Path) -> Result<Vec<RebuildRecord>, IngestError> {
    let mut reader = open(path)?;

    let mut records = Vec::new();
    for row in reader.deserialize::<RebuiltRow>() {
        match row {
            Ok(row) => records.push(RebuildRecord {
                address: row.address,
            }),
            Err(err) => log::warn!("skipping malformed rebuilt row: {err}"),
        }
    }
    Ok(records)
}

fn open(path: &Path) -> Result<csv::Reader<std::fs::File>, IngestError> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

/// Parses a year cell: blank is `None`, numeric text (including a
/// trailing `.0` from spreadsheet exports) is the integer year.
fn parse_year(cell: &str) -> Option<i32> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<i32>()
        .ok()
        .or_else(|| parse_float(trimmed).map(|year| year as i32))
}

/// Parses a cause cell into the taxonomy; anything unmapped is `None`.
fn parse_cause(cell: &str) -> Option<FireCause> {
    let code = parse_float(cell.trim())?;
    if !(0.0..=255.0).contains(&code) {
        return None;
    }
    FireCause::from_code(code as u8).ok()
}

fn parse_float(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("wildfire_atlas_ingest_tests")
            .join(format!("{name}_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn fire_history_skips_blank_years_and_unmapped_causes() {
        let dir = scratch_dir("fire_history");
        let path = dir.join("fires.csv");
        std::fs::write(
            &path,
            "YEAR_,CAUSE,GIS_ACRES\n\
             1987,1,120.5\n\
             ,9,33.0\n\
             2005.0,12,48.25\n\
             2006,2,not-a-number\n",
        )
        .unwrap();

        let records = load_fire_history(&path).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].year, Some(1987));
        assert_eq!(records[0].cause, Some(FireCause::Lightning));
        assert!((records[0].burned_acres - 120.5).abs() < f64::EPSILON);

        // Blank year survives as a record the aggregator will skip.
        assert_eq!(records[1].year, None);
        assert_eq!(records[1].cause, Some(FireCause::Miscellaneous));

        // Code 12 is not part of the taxonomy.
        assert_eq!(records[2].year, Some(2005));
        assert_eq!(records[2].cause, None);
    }

    #[test]
    fn climate_files_concatenate_and_sort_by_date() {
        let data_dir = scratch_dir("climate");
        let dir = data_dir.join("nfdrs");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("1981.csv"),
            "date,bi,fm100\n1981-01-01,21.0,14.0\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("1980.csv"),
            "date,bi,fm100\n1980-06-02,35.5,9.5\n1980-06-01,30.0,10.0\n",
        )
        .unwrap();

        let observations = load_climate_daily(&dir).unwrap();
        let dates: Vec<String> = observations
            .iter()
            .map(|obs| obs.date.to_string())
            .collect();
        assert_eq!(dates, vec!["1980-06-01", "1980-06-02", "1981-01-01"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = scratch_dir("missing");
        assert!(load_fire_history(&dir.join("nope.csv")).is_err());
    }

    #[test]
    fn home_tables_load_both_shapes() {
        let dir = scratch_dir("homes");
        let burnt = dir.join("burnt.csv");
        std::fs::write(
            &burnt,
            "address,lat,lon,zestimate\n10 Oak St,38.43,-122.65,412000\n",
        )
        .unwrap();
        let rebuilt = dir.join("recovered.csv");
        std::fs::write(&rebuilt, "address\n10 Oak St\n").unwrap();

        let destroyed = load_destroyed_homes(&burnt).unwrap();
        assert_eq!(destroyed.len(), 1);
        assert_eq!(destroyed[0].address, "10 Oak St");
        assert!((destroyed[0].assessed_value - 412_000.0).abs() < f64::EPSILON);

        let rebuilt = load_rebuilt_homes(&rebuilt).unwrap();
        assert_eq!(rebuilt.len(), 1);
        assert_eq!(rebuilt[0].address, "10 Oak St");
    }
}
