//! Shared domain types for the bikeshare explorer.
//!
//! Holds the city/month/day vocabulary, trip records, the error taxonomy,
//! command-line settings, the city → file registry and text formatting
//! helpers used by the data and runtime crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod sources;

pub use error::{BikeshareError, Result};
