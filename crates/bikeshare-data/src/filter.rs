//! Month and day-of-week filtering over a loaded [`Dataset`].

use bikeshare_core::models::{DayFilter, MonthFilter};

use crate::reader::Dataset;

/// Keep only trips that started in the selected month.
pub fn filter_by_month(mut dataset: Dataset, month: MonthFilter) -> Dataset {
    dataset.records.retain(|r| month.matches(r));
    dataset
}

/// Keep only trips that started on the selected weekday.
pub fn filter_by_day(mut dataset: Dataset, day: DayFilter) -> Dataset {
    dataset.records.retain(|r| day.matches(r));
    dataset
}

/// Apply both filters. A trip must pass each one to be kept.
pub fn apply_filters(dataset: Dataset, month: MonthFilter, day: DayFilter) -> Dataset {
    filter_by_day(filter_by_month(dataset, month), day)
}
