use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bikeshare explorer.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// A city, month or day entered at a prompt is not in its permitted set.
    #[error("Invalid {field}: {value}")]
    InvalidSelection { field: &'static str, value: String },

    /// The console input stream reached end-of-file.
    #[error("Input stream closed")]
    InputClosed,

    /// A source file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file is not well-formed CSV.
    #[error("Failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from a source file's header row.
    #[error("Missing column \"{column}\" in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// A data row has a value that cannot be interpreted.
    #[error("Invalid record at row {row} in {path}: {reason}")]
    InvalidRecord {
        path: PathBuf,
        row: usize,
        reason: String,
    },

    /// No source file is registered for the requested city.
    #[error("No data source configured for {0}")]
    UnknownSource(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BikeshareError {
    /// `true` for the failures that mean a city's trip data cannot be loaded.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(
            self,
            BikeshareError::FileRead { .. }
                | BikeshareError::CsvParse { .. }
                | BikeshareError::MissingColumn { .. }
                | BikeshareError::InvalidRecord { .. }
                | BikeshareError::UnknownSource(_)
        )
    }
}

/// Convenience alias used throughout the bikeshare crates.
pub type Result<T> = std::result::Result<T, BikeshareError>;
