//! Paging through raw trip rows on request.

use std::io::{BufRead, Write};

use bikeshare_core::error::Result;
use bikeshare_core::models::{Schema, TripRecord};
use bikeshare_core::settings::PreviewMode;
use bikeshare_data::reader::Dataset;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use tracing::debug;

use crate::console::Console;
use crate::prompt::ask_yes_no;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const MISSING: &str = "-";

// ── RowPager ──────────────────────────────────────────────────────────────────

/// Hands out successive pages of a record slice.
#[derive(Debug)]
pub struct RowPager<'a> {
    records: &'a [TripRecord],
    page_size: usize,
    mode: PreviewMode,
    cursor: usize,
}

impl<'a> RowPager<'a> {
    pub fn new(records: &'a [TripRecord], page_size: usize, mode: PreviewMode) -> Self {
        Self {
            records,
            page_size: page_size.max(1),
            mode,
            cursor: 0,
        }
    }

    /// The next page of rows; shorter than `page_size` near the end and
    /// empty once an advancing pager has shown everything.
    pub fn next_page(&mut self) -> &'a [TripRecord] {
        let len = self.records.len();
        match self.mode {
            PreviewMode::Repeat => &self.records[..self.page_size.min(len)],
            PreviewMode::Advance => {
                let start = self.cursor;
                let end = (start + self.page_size).min(len);
                self.cursor = end;
                &self.records[start..end]
            }
        }
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render `rows` as a text table with the columns `schema` has.
pub fn format_rows(rows: &[TripRecord], schema: Schema) -> String {
    let mut header = vec![
        "",
        "Start Time",
        "End Time",
        "Start Station",
        "End Station",
        "User Type",
    ];
    if schema.has_gender {
        header.push("Gender");
    }
    if schema.has_birth_year {
        header.push("Birth Year");
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(header);

    for r in rows {
        let mut cells = vec![
            Cell::new(&r.id),
            Cell::new(r.start_time.format(TIMESTAMP_FORMAT)),
            Cell::new(or_missing(r.end_time.map(|t| t.format(TIMESTAMP_FORMAT)))),
            Cell::new(or_missing(r.start_station.as_deref())),
            Cell::new(or_missing(r.end_station.as_deref())),
            Cell::new(or_missing(r.user_type.as_deref())),
        ];
        if schema.has_gender {
            cells.push(Cell::new(or_missing(r.gender.as_deref())));
        }
        if schema.has_birth_year {
            cells.push(Cell::new(or_missing(r.birth_year)));
        }
        table.add_row(cells);
    }

    table.to_string()
}

fn or_missing<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

// ── Interactive loop ──────────────────────────────────────────────────────────

/// Offer raw rows `page_size` at a time until the user declines.
pub fn run_preview<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    dataset: &Dataset,
    page_size: usize,
    mode: PreviewMode,
) -> Result<()> {
    if dataset.is_empty() {
        console.say("\nNo raw data to display.")?;
        return Ok(());
    }

    let question = format!(
        "Would you like to see {} lines of raw data? Enter yes or no.",
        page_size
    );
    let mut pager = RowPager::new(&dataset.records, page_size, mode);
    let mut pages_shown = 0usize;

    while ask_yes_no(console, &question)? {
        let page = pager.next_page();
        if page.is_empty() {
            console.say("No more raw data to display.")?;
            break;
        }
        console.say(&format_rows(page, dataset.schema))?;
        pages_shown += 1;
    }

    debug!(pages_shown, "raw data preview finished");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::models::City;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::io::Cursor;

    fn trip(i: u32) -> TripRecord {
        let start: NaiveDateTime = NaiveDate::from_ymd_opt(2017, 1, 1)
            .unwrap()
            .and_hms_opt(i % 24, 0, 0)
            .unwrap();
        TripRecord {
            id: format!("row{i}"),
            start_time: start,
            end_time: Some(start + chrono::Duration::minutes(5)),
            start_station: Some(format!("Station {i}")),
            end_station: Some("Union Station".to_string()),
            user_type: Some("Subscriber".to_string()),
            gender: (i % 2 == 0).then(|| "Female".to_string()),
            birth_year: Some(1980 + i as i32),
        }
    }

    fn records(n: u32) -> Vec<TripRecord> {
        (0..n).map(trip).collect()
    }

    fn ids(page: &[TripRecord]) -> Vec<&str> {
        page.iter().map(|r| r.id.as_str()).collect()
    }

    // ── RowPager ──────────────────────────────────────────────────────────────

    #[test]
    fn test_advancing_pager_walks_through_rows() {
        let rows = records(12);
        let mut pager = RowPager::new(&rows, 5, PreviewMode::Advance);

        assert_eq!(ids(pager.next_page()), vec!["row0", "row1", "row2", "row3", "row4"]);
        assert_eq!(ids(pager.next_page()), vec!["row5", "row6", "row7", "row8", "row9"]);
        assert_eq!(ids(pager.next_page()), vec!["row10", "row11"]);
        assert!(pager.next_page().is_empty());
    }

    #[test]
    fn test_repeating_pager_always_shows_first_page() {
        let rows = records(8);
        let mut pager = RowPager::new(&rows, 5, PreviewMode::Repeat);

        let first = ids(pager.next_page());
        assert_eq!(first, vec!["row0", "row1", "row2", "row3", "row4"]);
        assert_eq!(ids(pager.next_page()), first);
    }

    #[test]
    fn test_pager_with_fewer_rows_than_page() {
        let rows = records(3);
        let mut pager = RowPager::new(&rows, 5, PreviewMode::Advance);
        assert_eq!(pager.next_page().len(), 3);

        let mut pager = RowPager::new(&rows, 5, PreviewMode::Repeat);
        assert_eq!(pager.next_page().len(), 3);
    }

    // ── format_rows ───────────────────────────────────────────────────────────

    fn table_line<'a>(text: &'a str, needle: &str) -> &'a str {
        text.lines()
            .find(|line| line.contains(needle))
            .unwrap_or_else(|| panic!("no line containing {needle:?} in\n{text}"))
    }

    #[test]
    fn test_format_rows_full_schema() {
        let rows = records(2);
        let text = format_rows(
            &rows,
            Schema {
                has_gender: true,
                has_birth_year: true,
            },
        );

        let header = table_line(&text, "Start Time");
        assert!(header.contains("End Station"));
        assert!(header.contains("Gender"));
        assert!(header.contains("Birth Year"));

        let first = table_line(&text, "row0");
        assert!(first.contains("2017-01-01 00:00:00"));
        assert!(first.contains("Station 0"));
        assert!(first.contains("Female"));

        // row1 has no gender recorded.
        let second = table_line(&text, "row1");
        assert!(second.contains(" - "));
        assert!(second.contains("1981"));
    }

    #[test]
    fn test_format_rows_marks_blank_cells() {
        let mut row = trip(0);
        row.end_time = None;
        row.start_station = None;
        let text = format_rows(&[row], Schema::default());

        let line = table_line(&text, "row0");
        assert!(line.contains("2017-01-01 00:00:00"));
        assert!(!line.contains("00:05:00"));
        assert!(line.contains("Union Station"));
        assert_eq!(line.matches(" - ").count(), 2);
    }

    #[test]
    fn test_format_rows_omits_missing_columns() {
        let rows = records(1);
        let text = format_rows(&rows, Schema::default());
        assert!(!text.contains("Gender"));
        assert!(!text.contains("Birth Year"));
        assert!(text.contains("User Type"));
    }

    // ── run_preview ───────────────────────────────────────────────────────────

    fn dataset(n: u32) -> Dataset {
        Dataset {
            city: City::Chicago,
            schema: Schema::default(),
            records: records(n),
        }
    }

    fn run(input: &[u8], dataset: &Dataset, mode: PreviewMode) -> String {
        let mut console = Console::new(Cursor::new(input.to_vec()), Vec::new());
        run_preview(&mut console, dataset, 5, mode).expect("preview");
        String::from_utf8(console.into_parts().1).expect("utf-8 output")
    }

    #[test]
    fn test_run_preview_advances_until_declined() {
        let out = run(b"yes\nYES\nno\n", &dataset(12), PreviewMode::Advance);
        assert!(out.contains("row4"));
        assert!(out.contains("row9"));
        assert!(!out.contains("row10"));
        assert_eq!(out.matches("Would you like to see 5 lines").count(), 3);
    }

    #[test]
    fn test_run_preview_stops_when_exhausted() {
        let out = run(b"yes\nyes\nyes\n", &dataset(6), PreviewMode::Advance);
        assert!(out.contains("row5"));
        assert!(out.contains("No more raw data to display."));
    }

    #[test]
    fn test_run_preview_repeat_mode_reshows_first_rows() {
        let out = run(b"yes\nyes\nno\n", &dataset(12), PreviewMode::Repeat);
        assert_eq!(out.matches("row0").count(), 2);
        assert!(!out.contains("row5"));
    }

    #[test]
    fn test_run_preview_empty_dataset() {
        let out = run(b"yes\n", &dataset(0), PreviewMode::Advance);
        assert!(out.contains("No raw data to display."));
        assert!(!out.contains("Would you like"));
    }
}
