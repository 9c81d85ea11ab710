//! CSV loading for city trip files.
//!
//! Reads the per-city source file registered in [`DataSources`], maps its
//! header row onto the [`TripRecord`] fields and records which optional
//! columns the file carries as a [`Schema`].

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{City, FilterSelection, Schema, TripRecord};
use bikeshare_core::sources::DataSources;
use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::filter::apply_filters;

// ── Column names ──────────────────────────────────────────────────────────────

const START_TIME: &str = "Start Time";
const END_TIME: &str = "End Time";
const START_STATION: &str = "Start Station";
const END_STATION: &str = "End Station";
const USER_TYPE: &str = "User Type";
const GENDER: &str = "Gender";
const BIRTH_YEAR: &str = "Birth Year";

/// Timestamp layouts accepted in the Start Time / End Time columns.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

// ── Dataset ───────────────────────────────────────────────────────────────────

/// Trip records for one city, in file order.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub city: City,
    pub schema: Schema,
    pub records: Vec<TripRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the file for `selection.city` and apply its month and day filters.
pub fn load_data(sources: &DataSources, selection: &FilterSelection) -> Result<Dataset> {
    let dataset = load_city(sources, selection.city)?;
    let total = dataset.len();
    let filtered = apply_filters(dataset, selection.month, selection.day);
    info!(
        "Filtered {}: {} of {} trips match (month: {}, day: {})",
        selection.city,
        filtered.len(),
        total,
        selection.month,
        selection.day
    );
    Ok(filtered)
}

/// Load every trip for `city` without filtering.
pub fn load_city(sources: &DataSources, city: City) -> Result<Dataset> {
    let path = sources.path_for(city)?;
    let started = Instant::now();
    let (schema, records) = read_trips(path)?;
    debug!(
        "Loaded {} trips for {} from {} in {:.3}s",
        records.len(),
        city,
        path.display(),
        started.elapsed().as_secs_f64()
    );
    Ok(Dataset {
        city,
        schema,
        records,
    })
}

/// Parse a trip CSV file.
///
/// The header row must name Start Time, End Time, Start Station, End Station
/// and User Type. Gender and Birth Year are optional and reported through the
/// returned [`Schema`]. A leading unnamed column is treated as the row label.
///
/// Blank cells are kept as missing values, except a blank Start Time: such a
/// row has no month, day or hour and is skipped. Cells that are present but
/// unparseable fail the whole file.
pub fn read_trips(path: &Path) -> Result<(Schema, Vec<TripRecord>)> {
    let file = File::open(path).map_err(|source| BikeshareError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| csv_error(path, source))?
        .clone();
    let columns = ColumnMap::from_headers(&headers, path)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (ordinal, row) in reader.records().enumerate() {
        let row = row.map_err(|source| csv_error(path, source))?;
        match columns.parse_row(&row, ordinal, path)? {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(
            "Skipped {} rows without a Start Time in {}",
            skipped,
            path.display()
        );
    }

    Ok((columns.schema(), records))
}

/// Parse a Start Time / End Time cell.
///
/// Returns `None` for empty strings or unrecognised layouts.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    if s.is_empty() {
        return None;
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn csv_error(path: &Path, source: csv::Error) -> BikeshareError {
    BikeshareError::CsvParse {
        path: path.to_path_buf(),
        source,
    }
}

/// Column positions resolved from a file's header row.
#[derive(Debug)]
struct ColumnMap {
    id: Option<usize>,
    start_time: usize,
    end_time: usize,
    start_station: usize,
    end_station: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord, path: &Path) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| BikeshareError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
        };

        // Files exported with a dataframe index carry a blank first header.
        let id = headers
            .get(0)
            .filter(|h| h.is_empty() || h.starts_with("Unnamed"))
            .map(|_| 0);

        Ok(Self {
            id,
            start_time: require(START_TIME)?,
            end_time: require(END_TIME)?,
            start_station: require(START_STATION)?,
            end_station: require(END_STATION)?,
            user_type: require(USER_TYPE)?,
            gender: find(GENDER),
            birth_year: find(BIRTH_YEAR),
        })
    }

    fn schema(&self) -> Schema {
        Schema {
            has_gender: self.gender.is_some(),
            has_birth_year: self.birth_year.is_some(),
        }
    }

    /// `Ok(None)` for a row without a Start Time.
    fn parse_row(
        &self,
        row: &csv::StringRecord,
        ordinal: usize,
        path: &Path,
    ) -> Result<Option<TripRecord>> {
        let line = row
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(ordinal + 2);
        let invalid = |reason: String| BikeshareError::InvalidRecord {
            path: path.to_path_buf(),
            row: line,
            reason,
        };

        let cell = |idx: usize| row.get(idx).unwrap_or("");
        let optional = |idx: Option<usize>| {
            idx.map(cell)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let timestamp = |idx: usize, column: &str| match optional(Some(idx)) {
            Some(raw) => parse_timestamp(&raw)
                .map(Some)
                .ok_or_else(|| invalid(format!("{} \"{}\" is not a timestamp", column, raw))),
            None => Ok(None),
        };

        let Some(start_time) = timestamp(self.start_time, START_TIME)? else {
            debug!("{}:{} has no {}", path.display(), line, START_TIME);
            return Ok(None);
        };
        let end_time = timestamp(self.end_time, END_TIME)?;

        let birth_year = match optional(self.birth_year) {
            Some(raw) => Some(parse_birth_year(&raw).ok_or_else(|| {
                invalid(format!("{} \"{}\" is not a year", BIRTH_YEAR, raw))
            })?),
            None => None,
        };

        let id = optional(self.id).unwrap_or_else(|| ordinal.to_string());

        Ok(Some(TripRecord {
            id,
            start_time,
            end_time,
            start_station: optional(Some(self.start_station)),
            end_station: optional(Some(self.end_station)),
            user_type: optional(Some(self.user_type)),
            gender: optional(self.gender),
            birth_year,
        }))
    }
}

/// Birth years are stored as floats (`1992.0`) in some exports.
fn parse_birth_year(raw: &str) -> Option<i32> {
    if let Ok(year) = raw.parse::<i32>() {
        return Some(year);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 {
        Some(value as i32)
    } else {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
