//! The four descriptive reports computed over a filtered [`Dataset`].
//!
//! Each report reads the dataset only and does not depend on any other
//! report having run. Every metric is optional so an empty dataset yields a
//! report full of `None` rather than an error.

use bikeshare_core::models::TripRecord;
use chrono::{Duration, Weekday};

use crate::reader::Dataset;
use crate::stats::{mode, value_counts};

// ── Time of travel ────────────────────────────────────────────────────────────

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStats {
    /// Month number (1–12).
    pub popular_month: Option<u32>,
    pub popular_day: Option<Weekday>,
    /// Start hour (0–23).
    pub popular_hour: Option<u32>,
}

impl TimeStats {
    pub fn compute(dataset: &Dataset) -> Self {
        let records = &dataset.records;
        Self {
            popular_month: mode(records.iter().map(TripRecord::month)),
            popular_day: mode(records.iter().map(TripRecord::weekday)),
            popular_hour: mode(records.iter().map(TripRecord::hour)),
        }
    }
}

// ── Stations and trips ────────────────────────────────────────────────────────

/// Most popular stations and station pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub popular_start_station: Option<String>,
    pub popular_end_station: Option<String>,
    /// `"From: <start> To: <end>"` label of the most frequent pair.
    pub popular_trip: Option<String>,
}

impl StationStats {
    pub fn compute(dataset: &Dataset) -> Self {
        let records = &dataset.records;
        Self {
            popular_start_station: mode(
                records.iter().filter_map(|r| r.start_station.as_deref()),
            )
            .map(str::to_string),
            popular_end_station: mode(records.iter().filter_map(|r| r.end_station.as_deref()))
                .map(str::to_string),
            popular_trip: mode(records.iter().filter_map(TripRecord::trip_label)),
        }
    }
}

// ── Trip duration ─────────────────────────────────────────────────────────────

/// Total and mean travel time, truncated to whole seconds.
///
/// Trips without an end time have no duration and are left out of both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationStats {
    /// Trips that contributed a duration.
    pub trip_count: usize,
    /// Whole seconds of the summed travel durations.
    pub total_seconds: i64,
    /// Whole seconds of the mean travel duration; `None` with no trips.
    pub mean_seconds: Option<i64>,
}

impl DurationStats {
    pub fn compute(dataset: &Dataset) -> Self {
        let (total, trip_count) = dataset
            .records
            .iter()
            .filter_map(TripRecord::travel_duration)
            .fold((Duration::zero(), 0usize), |(acc, n), d| (acc + d, n + 1));

        let mean_seconds = i64::try_from(trip_count)
            .ok()
            .filter(|n| *n > 0)
            .map(|n| (total.num_milliseconds() / n) / 1_000);

        Self {
            trip_count,
            total_seconds: total.num_seconds(),
            mean_seconds,
        }
    }

    pub fn total_minutes(&self) -> f64 {
        self.total_seconds as f64 / 60.0
    }

    pub fn mean_minutes(&self) -> Option<f64> {
        self.mean_seconds.map(|s| s as f64 / 60.0)
    }
}

// ── User demographics ─────────────────────────────────────────────────────────

/// Birth-year extremes and mode over the non-blank Birth Year cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: Option<i32>,
    pub most_recent: Option<i32>,
    pub most_common: Option<i32>,
}

/// Counts by user type, gender and birth year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    /// `None` when the source file has no Gender column.
    pub genders: Option<Vec<(String, usize)>>,
    /// `None` when the source file has no Birth Year column.
    pub birth_years: Option<BirthYearStats>,
}

impl UserStats {
    pub fn compute(dataset: &Dataset) -> Self {
        let records = &dataset.records;

        let user_types = owned_counts(records.iter().filter_map(|r| r.user_type.as_deref()));

        let genders = dataset
            .schema
            .has_gender
            .then(|| owned_counts(records.iter().filter_map(|r| r.gender.as_deref())));

        let birth_years = dataset.schema.has_birth_year.then(|| {
            let years = || records.iter().filter_map(|r| r.birth_year);
            BirthYearStats {
                earliest: years().min(),
                most_recent: years().max(),
                most_common: mode(years()),
            }
        });

        Self {
            user_types,
            genders,
            birth_years,
        }
    }
}

fn owned_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    value_counts(values)
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
