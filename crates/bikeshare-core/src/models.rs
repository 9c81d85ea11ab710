use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Month, NaiveDateTime, Timelike, Weekday};
use serde::{de, Deserialize, Deserializer};

use crate::error::BikeshareError;

// ── City ──────────────────────────────────────────────────────────────────────

/// One of the cities the dataset covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// Every supported city, in prompt order.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// The lower-case name users type at the prompt.
    pub fn key(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// File name used when no explicit source path is configured.
    pub fn default_file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        };
        f.write_str(name)
    }
}

/// Deserialized from the same names the prompt accepts.
impl<'de> Deserialize<'de> for City {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|c| c.key() == normalised)
            .ok_or(BikeshareError::InvalidSelection {
                field: "city",
                value: normalised,
            })
    }
}

// ── Calendar vocabulary ───────────────────────────────────────────────────────

/// Months that can be selected as a filter. Position + 1 is the month number.
pub const FILTER_MONTHS: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

const ALL_MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// English name of a 1-based month number, e.g. `3` → `"March"`.
///
/// Returns `None` outside `1..=12`.
pub fn month_name(number: u32) -> Option<&'static str> {
    let index = usize::try_from(number).ok()?.checked_sub(1)?;
    ALL_MONTHS.get(index).map(|m| m.name())
}

/// Full English weekday name, e.g. [`Weekday::Mon`] → `"Monday"`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

// ── Filters ───────────────────────────────────────────────────────────────────

/// Month restriction chosen at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Only(Month),
}

impl MonthFilter {
    /// `true` when `record` started in the selected month.
    pub fn matches(&self, record: &TripRecord) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Only(month) => record.month() == month.number_from_month(),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase();
        if normalised == "all" {
            return Ok(MonthFilter::All);
        }
        FILTER_MONTHS
            .into_iter()
            .find(|m| m.name().to_lowercase() == normalised)
            .map(MonthFilter::Only)
            .ok_or(BikeshareError::InvalidSelection {
                field: "month",
                value: normalised,
            })
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("All"),
            MonthFilter::Only(month) => f.write_str(month.name()),
        }
    }
}

/// Day-of-week restriction chosen at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Only(Weekday),
}

impl DayFilter {
    /// `true` when `record` started on the selected weekday.
    pub fn matches(&self, record: &TripRecord) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Only(day) => record.weekday() == *day,
        }
    }
}

impl FromStr for DayFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase();
        if normalised == "all" {
            return Ok(DayFilter::All);
        }
        WEEKDAYS
            .into_iter()
            .find(|d| weekday_name(*d).to_lowercase() == normalised)
            .map(DayFilter::Only)
            .ok_or(BikeshareError::InvalidSelection {
                field: "day",
                value: normalised,
            })
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("All"),
            DayFilter::Only(day) => f.write_str(weekday_name(*day)),
        }
    }
}

/// A validated (city, month, day) choice for one session iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSelection {
    /// Human-readable echo of the chosen values.
    pub fn describe(&self) -> String {
        format!(
            "Your filter settings are:\nCity: {}\nMonth: {}\nDay: {}",
            self.city, self.month, self.day
        )
    }
}

// ── Trip records ──────────────────────────────────────────────────────────────

/// Which optional columns a loaded source file provides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schema {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

/// A single bikeshare trip read from a city CSV file.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// Row label from the file's index column, or the 0-based row ordinal.
    pub id: String,
    pub start_time: NaiveDateTime,
    /// `None` when the cell is blank.
    pub end_time: Option<NaiveDateTime>,
    /// `None` when the cell is blank.
    pub start_station: Option<String>,
    /// `None` when the cell is blank.
    pub end_station: Option<String>,
    /// `None` when the cell is blank.
    pub user_type: Option<String>,
    /// `None` when the cell is blank or the file has no Gender column.
    pub gender: Option<String>,
    /// `None` when the cell is blank or the file has no Birth Year column.
    pub birth_year: Option<i32>,
}

impl TripRecord {
    /// Month number (1–12) of the start time.
    pub fn month(&self) -> u32 {
        self.start_time.month()
    }

    /// Day of week of the start time.
    pub fn weekday(&self) -> Weekday {
        self.start_time.weekday()
    }

    /// Hour (0–23) of the start time.
    pub fn hour(&self) -> u32 {
        self.start_time.hour()
    }

    /// Time between start and end; `None` without an end time.
    pub fn travel_duration(&self) -> Option<Duration> {
        self.end_time.map(|end| end - self.start_time)
    }

    /// Station pair label, e.g. `"From: Canal St To: Clark St"`.
    ///
    /// Only built when both stations are known.
    pub fn trip_label(&self) -> Option<String> {
        match (&self.start_station, &self.end_station) {
            (Some(from), Some(to)) => Some(format!("From: {} To: {}", from, to)),
            _ => None,
        }
    }
}
