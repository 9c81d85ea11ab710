//! Text rendering of the four reports, with per-report timing.

use std::io::{BufRead, Write};
use std::time::Instant;

use bikeshare_core::error::Result;
use bikeshare_core::formatting::{format_elapsed, format_minutes, format_time, SEPARATOR};
use bikeshare_core::models::{month_name, weekday_name};
use bikeshare_data::reader::Dataset;
use bikeshare_data::reports::{DurationStats, StationStats, TimeStats, UserStats};
use tracing::debug;

use crate::console::Console;

pub const NO_DATA: &str = "No data available";

fn or_no_data<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NO_DATA.to_string())
}

fn render_counts(lines: &mut Vec<String>, counts: &[(String, usize)]) {
    if counts.is_empty() {
        lines.push(format!("  {}", NO_DATA));
    }
    for (value, count) in counts {
        lines.push(format!("  {}: {}", value, count));
    }
}

// ── Per-report renderers ──────────────────────────────────────────────────────

pub fn render_time_stats(stats: &TimeStats) -> String {
    [
        format!(
            "Most popular month: {}",
            or_no_data(stats.popular_month.and_then(month_name))
        ),
        format!(
            "Most popular day: {}",
            or_no_data(stats.popular_day.map(weekday_name))
        ),
        format!("Most popular start hour: {}", or_no_data(stats.popular_hour)),
    ]
    .join("\n")
}

pub fn render_station_stats(stats: &StationStats) -> String {
    [
        format!(
            "Most popular start station: {}",
            or_no_data(stats.popular_start_station.as_deref())
        ),
        format!(
            "Most popular end station: {}",
            or_no_data(stats.popular_end_station.as_deref())
        ),
        format!(
            "Most popular trip: {}",
            or_no_data(stats.popular_trip.as_deref())
        ),
    ]
    .join("\n")
}

pub fn render_duration_stats(stats: &DurationStats) -> String {
    let total = stats.total_minutes();
    let total_line = if stats.trip_count == 0 {
        format!("Total travel time: {}", NO_DATA)
    } else {
        format!(
            "Total travel time: {} minutes ({})",
            format_minutes(total),
            format_time(total)
        )
    };
    let mean_line = match stats.mean_minutes() {
        Some(mean) => format!(
            "Mean travel time: {} minutes ({})",
            format_minutes(mean),
            format_time(mean)
        ),
        None => format!("Mean travel time: {}", NO_DATA),
    };
    format!("{}\n{}", total_line, mean_line)
}

pub fn render_user_stats(stats: &UserStats) -> String {
    let mut lines = vec!["Counts of user types:".to_string()];
    render_counts(&mut lines, &stats.user_types);

    match &stats.genders {
        Some(genders) => {
            lines.push("\nCounts of gender:".to_string());
            render_counts(&mut lines, genders);
        }
        None => lines.push("\nNo gender data available".to_string()),
    }

    match &stats.birth_years {
        Some(years) => {
            lines.push(format!(
                "\nOldest customer born in: {}",
                or_no_data(years.earliest)
            ));
            lines.push(format!(
                "Youngest customer born in: {}",
                or_no_data(years.most_recent)
            ));
            lines.push(format!(
                "Most common year of birth: {}",
                or_no_data(years.most_common)
            ));
        }
        None => lines.push("\nNo birth year data available".to_string()),
    }

    lines.join("\n")
}

// ── Report runner ─────────────────────────────────────────────────────────────

/// Compute one report, print it and the time the computation took.
fn run_report<R, W, T>(
    console: &mut Console<R, W>,
    title: &str,
    compute: impl FnOnce() -> T,
    render: impl FnOnce(&T) -> String,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    console.say(&format!("\n{}\n", title))?;

    let started = Instant::now();
    let stats = compute();
    let elapsed = started.elapsed();

    console.say(&render(&stats))?;
    console.say(&format!("\n{}", format_elapsed(elapsed)))?;
    console.say(SEPARATOR)?;

    debug!(
        report = title,
        elapsed_ms = elapsed.as_secs_f64() * 1_000.0,
        "report computed"
    );
    Ok(())
}

/// Print the time, station, duration and user reports in that order.
pub fn print_reports<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    dataset: &Dataset,
) -> Result<()> {
    run_report(
        console,
        "Calculating The Most Frequent Times of Travel...",
        || TimeStats::compute(dataset),
        render_time_stats,
    )?;
    run_report(
        console,
        "Calculating The Most Popular Stations and Trip...",
        || StationStats::compute(dataset),
        render_station_stats,
    )?;
    run_report(
        console,
        "Calculating Trip Duration...",
        || DurationStats::compute(dataset),
        render_duration_stats,
    )?;
    run_report(
        console,
        "Calculating User Stats...",
        || UserStats::compute(dataset),
        render_user_stats,
    )?;
    Ok(())
}
