//! Data layer for the bikeshare explorer.
//!
//! Reads a city's trip CSV into a [`reader::Dataset`], applies the month and
//! day filters, and computes the four descriptive reports over the result.

pub mod filter;
pub mod reader;
pub mod reports;
pub mod stats;

pub use bikeshare_core as core;
