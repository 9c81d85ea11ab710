//! The restartable filter → load → report → preview loop.

use std::io::{BufRead, Write};

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::settings::{PreviewMode, Settings};
use bikeshare_core::sources::DataSources;
use bikeshare_data::reader::load_data;
use tracing::{info, warn};

use crate::console::Console;
use crate::preview::run_preview;
use crate::prompt::{ask_yes_no, collect_filters};
use crate::render::print_reports;

pub const RESTART_QUESTION: &str = "Would you like to restart? Enter yes or no.";

// ── Public types ──────────────────────────────────────────────────────────────

/// Where the driver goes after an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Terminated,
}

/// Behavior knobs for a session, taken from [`Settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub preview_rows: usize,
    pub preview_mode: PreviewMode,
    /// Propagate load failures instead of reporting them and moving on.
    pub exit_on_load_error: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            preview_rows: 5,
            preview_mode: PreviewMode::Advance,
            exit_on_load_error: false,
        }
    }
}

impl From<&Settings> for SessionOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            preview_rows: usize::from(settings.preview_rows),
            preview_mode: settings.preview_mode,
            exit_on_load_error: settings.exit_on_load_error,
        }
    }
}

// ── SessionDriver ─────────────────────────────────────────────────────────────

/// Runs session iterations until the user declines to restart.
pub struct SessionDriver {
    sources: DataSources,
    options: SessionOptions,
}

impl SessionDriver {
    pub fn new(sources: DataSources, options: SessionOptions) -> Self {
        Self { sources, options }
    }

    /// Loop until [`SessionState::Terminated`].
    ///
    /// Returns `Err` only for console write failures and, with
    /// `exit_on_load_error`, for data that cannot be loaded.
    pub fn run<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        let mut state = SessionState::Active;
        let mut iterations = 0usize;

        while state == SessionState::Active {
            iterations += 1;
            info!(iteration = iterations, "session iteration started");
            state = self.run_iteration(console)?;
        }

        info!(iterations, "session terminated");
        Ok(())
    }

    /// One pass of filter → load → reports → preview → restart prompt.
    pub fn run_iteration<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<SessionState> {
        let selection = match collect_filters(console) {
            Ok(selection) => selection,
            Err(BikeshareError::InputClosed) => {
                info!("input closed while collecting filters");
                return Ok(SessionState::Terminated);
            }
            Err(e) => return Err(e),
        };

        match load_data(&self.sources, &selection) {
            Ok(dataset) => {
                print_reports(console, &dataset)?;
                run_preview(
                    console,
                    &dataset,
                    self.options.preview_rows,
                    self.options.preview_mode,
                )?;
            }
            Err(e) if e.is_data_unavailable() && !self.options.exit_on_load_error => {
                warn!(error = %e, city = %selection.city, "city data unavailable");
                console.say(&format!(
                    "\nUnable to load data for {}: {}",
                    selection.city, e
                ))?;
            }
            Err(e) => return Err(e),
        }

        if ask_yes_no(console, RESTART_QUESTION)? {
            Ok(SessionState::Active)
        } else {
            Ok(SessionState::Terminated)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
