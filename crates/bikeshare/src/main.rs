mod bootstrap;

use anyhow::{Context, Result};
use bikeshare_core::settings::Settings;
use bikeshare_runtime::console::Console;
use bikeshare_runtime::session::{SessionDriver, SessionOptions};
use clap::Parser;

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(settings.effective_log_level())?;

    tracing::info!("Bikeshare explorer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data dir: {}, preview: {:?} x{}",
        settings.data_dir.display(),
        settings.preview_mode,
        settings.preview_rows
    );

    let sources = bootstrap::resolve_sources(&settings).context("loading data source overrides")?;
    let driver = SessionDriver::new(sources, SessionOptions::from(&settings));

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    driver.run(&mut console)?;

    Ok(())
}
