//! Interactive session layer for the bikeshare explorer.
//!
//! Drives the prompt loop over a [`console::Console`]: collects and validates
//! the filter selection, loads the dataset, prints the four reports, pages
//! through raw rows and asks whether to start over.

pub mod console;
pub mod preview;
pub mod prompt;
pub mod render;
pub mod session;

pub use bikeshare_core as core;
pub use bikeshare_data as data;
