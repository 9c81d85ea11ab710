use std::time::Duration;

/// Separator line printed between report sections.
pub const SEPARATOR: &str = "----------------------------------------";

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Nudge by a scaled epsilon so exact midpoints like 1.005 round up.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();
    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        // `frac_str` is "0.xx"; keep the ".xx" tail.
        let decimal_digits = &frac_str[1..];
        format!("{}{}", grouped, decimal_digits)
    };

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a number of minutes for the duration report, e.g. `"1,234.50"`.
pub fn format_minutes(minutes: f64) -> String {
    format_number(minutes, 2)
}

/// Format a duration in minutes as a compact human-readable string.
///
/// Partial minutes are dropped, so the result never overstates the
/// two-decimal figure it accompanies.
///
/// * `< 60` minutes → `"45m"`
/// * `< 1` day → `"3h"` or `"3h 45m"`
/// * otherwise → `"2d"`, `"2d 3h"` or `"2d 3h 45m"`
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::format_time;
///
/// assert_eq!(format_time(45.0),  "45m");
/// assert_eq!(format_time(225.0), "3h 45m");
/// assert_eq!(format_time(2_880.0), "2d");
/// assert_eq!(format_time(3_105.0), "2d 3h 45m");
/// ```
pub fn format_time(minutes: f64) -> String {
    let total_mins = minutes.floor() as i64;
    if total_mins < 60 {
        return format!("{}m", total_mins);
    }

    let days = total_mins / 1_440;
    let hours = (total_mins % 1_440) / 60;
    let mins = total_mins % 60;

    let mut parts = Vec::with_capacity(3);
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if mins > 0 {
        parts.push(format!("{}m", mins));
    }
    parts.join(" ")
}

/// Format the wall-clock time a report took, e.g. `"This took 0.0123 seconds."`.
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("This took {:.4} seconds.", elapsed.as_secs_f64())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
