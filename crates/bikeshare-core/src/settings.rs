use clap::{Parser, ValueEnum};
use std::path::PathBuf;

// ── PreviewMode ────────────────────────────────────────────────────────────────

/// How successive "show raw data" requests page through the dataset.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewMode {
    /// Each request shows the next unseen rows.
    #[default]
    Advance,
    /// Each request shows the first rows again.
    Repeat,
}

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Explore US bikeshare trip data interactively
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare",
    about = "Explore US bikeshare trip data interactively",
    version
)]
pub struct Settings {
    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// JSON file mapping city names to CSV paths
    #[arg(long)]
    pub sources: Option<PathBuf>,

    /// Raw-data preview paging
    #[arg(long, value_enum, default_value_t = PreviewMode::Advance)]
    pub preview_mode: PreviewMode,

    /// Rows shown per raw-data preview page (1-100)
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u16).range(1..=100))]
    pub preview_rows: u16,

    /// Exit with an error instead of returning to the restart prompt when a
    /// city file cannot be loaded
    #[arg(long)]
    pub exit_on_load_error: bool,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse settings from an explicit argument list.
    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Settings::parse_from(args)
    }

    /// Log level after applying `--debug`.
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "DEBUG"
        } else {
            &self.log_level
        }
    }
}
