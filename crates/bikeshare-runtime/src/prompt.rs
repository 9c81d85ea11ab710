//! Interactive collection of the city / month / day filter selection.
//!
//! Validation lives in the `FromStr` impls of the core models; this module
//! owns the retry loop and the wording shown to the user.

use std::io::{BufRead, Write};

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::formatting::SEPARATOR;
use bikeshare_core::models::{City, DayFilter, FilterSelection, MonthFilter};
use tracing::{debug, info, warn};

use crate::console::{Console, Reply};

pub const WELCOME: &str = "Hello! Let's dig into some US bikeshare data!";

pub const CITY_QUESTION: &str = "Please select the city you want to explore. \
Available cities are: Chicago, New York City, and Washington:";

pub const MONTH_QUESTION: &str = "Please select the month you want to filter by \
(January - June). If you don't want to filter by month select all:";

pub const DAY_QUESTION: &str = "Please select the day of the week you want to filter by. \
Please type in the full name of the day (e.g. Monday). If you don't want to filter by day select all:";

const UNREADABLE_INPUT: &str = "No valid input. Please try again";

/// Ask `question` until `parse` accepts the answer.
///
/// Rejected values and unreadable input print a diagnostic and ask again.
/// End of input stops the loop with [`BikeshareError::InputClosed`]
/// (see [`Reply::Closed`]).
pub fn ask_until_valid<R, W, T, F>(
    console: &mut Console<R, W>,
    question: &str,
    parse: F,
) -> Result<T>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Result<T>,
{
    loop {
        match console.ask(question)? {
            Reply::Line(answer) => match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(BikeshareError::InvalidSelection { field, value }) => {
                    debug!(field, value = %value, "selection rejected");
                    console.say(&format!(
                        "Data for {} is not available. Please try again.",
                        value
                    ))?;
                }
                Err(other) => return Err(other),
            },
            Reply::Unreadable(e) => {
                warn!(error = %e, "could not read answer");
                console.say(UNREADABLE_INPUT)?;
            }
            Reply::Closed => return Err(BikeshareError::InputClosed),
        }
    }
}

/// Prompt for city, month and day in turn and echo the result.
pub fn collect_filters<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<FilterSelection> {
    console.say(WELCOME)?;

    let city = ask_until_valid(console, CITY_QUESTION, |s| s.parse::<City>())?;
    let month = ask_until_valid(console, MONTH_QUESTION, |s| s.parse::<MonthFilter>())?;
    let day = ask_until_valid(console, DAY_QUESTION, |s| s.parse::<DayFilter>())?;

    let selection = FilterSelection { city, month, day };
    info!(city = %city, month = %month, day = %day, "filters selected");

    console.say(&format!("\n{}\n", selection.describe()))?;
    console.say(SEPARATOR)?;
    Ok(selection)
}

/// `true` for a case-insensitive "yes".
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

/// Ask a yes/no question. Anything but "yes", including end of input,
/// counts as no.
pub fn ask_yes_no<R: BufRead, W: Write>(console: &mut Console<R, W>, question: &str) -> Result<bool> {
    Ok(match console.ask(question)? {
        Reply::Line(answer) => is_affirmative(&answer),
        Reply::Unreadable(e) => {
            warn!(error = %e, "could not read answer; treating as no");
            false
        }
        Reply::Closed => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Month, Weekday};
    use std::io::Cursor;

    type TestConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

    fn console(input: &[u8]) -> TestConsole {
        Console::new(Cursor::new(input.to_vec()), Vec::new())
    }

    fn output(console: TestConsole) -> String {
        String::from_utf8(console.into_parts().1).expect("utf-8 output")
    }

    // ── collect_filters ───────────────────────────────────────────────────────

    #[test]
    fn test_collect_filters_valid_first_time() {
        let mut c = console(b"Chicago\nMarch\nall\n");
        let selection = collect_filters(&mut c).expect("valid selection");

        assert_eq!(
            selection,
            FilterSelection {
                city: City::Chicago,
                month: MonthFilter::Only(Month::March),
                day: DayFilter::All,
            }
        );

        let out = output(c);
        assert!(out.starts_with(WELCOME));
        assert!(out.contains("City: Chicago\nMonth: March\nDay: All"));
        assert!(out.trim_end().ends_with(SEPARATOR));
    }

    #[test]
    fn test_collect_filters_reprompts_each_field() {
        let mut c = console(b"boston\nall\nnew york city\njuly\njune\nfunday\nSUNDAY\n");
        let selection = collect_filters(&mut c).expect("valid selection");

        assert_eq!(selection.city, City::NewYorkCity);
        assert_eq!(selection.month, MonthFilter::Only(Month::June));
        assert_eq!(selection.day, DayFilter::Only(Weekday::Sun));

        let out = output(c);
        assert!(out.contains("Data for boston is not available. Please try again."));
        assert!(out.contains("Data for all is not available. Please try again."));
        assert!(out.contains("Data for july is not available. Please try again."));
        assert!(out.contains("Data for funday is not available. Please try again."));
        assert_eq!(out.matches(CITY_QUESTION).count(), 3);
        assert_eq!(out.matches(MONTH_QUESTION).count(), 2);
        assert_eq!(out.matches(DAY_QUESTION).count(), 2);
    }

    #[test]
    fn test_collect_filters_recovers_from_unreadable_input() {
        let mut c = console(b"\xff\xfe\nwashington\nall\nall\n");
        let selection = collect_filters(&mut c).expect("valid selection");

        assert_eq!(selection.city, City::Washington);
        assert!(output(c).contains(UNREADABLE_INPUT));
    }

    #[test]
    fn test_collect_filters_input_closed() {
        let mut c = console(b"chicago\n");
        let err = collect_filters(&mut c).unwrap_err();
        assert!(matches!(err, BikeshareError::InputClosed));
    }

    // ── ask_until_valid ───────────────────────────────────────────────────────

    #[test]
    fn test_ask_until_valid_does_not_reprompt_after_close() {
        let mut c = console(b"boston
");
        let err = ask_until_valid(&mut c, CITY_QUESTION, |s| s.parse::<City>()).unwrap_err();
        assert!(matches!(err, BikeshareError::InputClosed));

        let out = output(c);
        assert!(out.contains("Data for boston is not available."));
        assert_eq!(out.matches(CITY_QUESTION).count(), 2);
    }

    #[test]
    fn test_ask_until_valid_propagates_other_errors() {
        let mut c = console(b"anything\n");
        let err = ask_until_valid(&mut c, "Q?", |_| -> Result<()> {
            Err(BikeshareError::Config("boom".into()))
        })
        .unwrap_err();
        assert!(matches!(err, BikeshareError::Config(_)));
    }

    // ── yes / no ──────────────────────────────────────────────────────────────

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("yes"));
        assert!(is_affirmative("YES"));
        assert!(is_affirmative(" Yes "));
        assert!(!is_affirmative("y"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative(""));
    }

    #[test]
    fn test_ask_yes_no() {
        let mut c = console(b"Yes\nnope\n");
        assert!(ask_yes_no(&mut c, "Restart?").unwrap());
        assert!(!ask_yes_no(&mut c, "Restart?").unwrap());
        assert!(!ask_yes_no(&mut c, "Restart?").unwrap());
    }
}
