use std::path::{Path, PathBuf};

use bikeshare_core::error::Result;
use bikeshare_core::settings::Settings;
use bikeshare_core::sources::DataSources;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Override file looked for inside the data directory.
const LOCAL_SOURCES_FILE: &str = "bikeshare.json";

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` name to a `tracing` filter directive.
///
/// Falls back to `"warn"` for unrecognised names.
fn filter_directive(log_level: &str) -> &'static str {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" | "CRITICAL" => "error",
        _ => "warn",
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Output goes to stderr so log lines never mix with the prompt stream on
/// stdout.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(filter_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()?;

    Ok(())
}

// ── Source discovery ───────────────────────────────────────────────────────────

/// Locate a source override file when `--sources` was not given.
///
/// Checks the following paths in order and returns the first that exists:
/// 1. `<data_dir>/bikeshare.json`
/// 2. `~/.config/bikeshare/sources.json`
pub fn discover_sources_file(data_dir: &Path) -> Option<PathBuf> {
    let local = data_dir.join(LOCAL_SOURCES_FILE);
    if local.is_file() {
        return Some(local);
    }
    let home = dirs::home_dir()?;
    let user = home.join(".config").join("bikeshare").join("sources.json");
    user.is_file().then_some(user)
}

/// Build the city → file registry from the settings.
///
/// Every city defaults to its standard file name in `--data-dir`; an explicit
/// `--sources` file, or else a discovered one, overrides individual cities.
pub fn resolve_sources(settings: &Settings) -> Result<DataSources> {
    let sources = DataSources::from_dir(&settings.data_dir);
    let overrides = settings
        .sources
        .clone()
        .or_else(|| discover_sources_file(&settings.data_dir));

    match overrides {
        Some(path) => {
            tracing::info!("Using source overrides from {}", path.display());
            sources.load_overrides(&path)
        }
        None => Ok(sources),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::models::City;
    use tempfile::TempDir;

    // ── filter_directive ──────────────────────────────────────────────────────

    #[test]
    fn test_filter_directive_mapping() {
        assert_eq!(filter_directive("DEBUG"), "debug");
        assert_eq!(filter_directive("info"), "info");
        assert_eq!(filter_directive("WARNING"), "warn");
        assert_eq!(filter_directive("CRITICAL"), "error");
        assert_eq!(filter_directive("nonsense"), "warn");
    }

    // ── discover_sources_file ─────────────────────────────────────────────────

    #[test]
    fn test_discover_prefers_data_dir_file() {
        let tmp = TempDir::new().expect("tempdir");
        let local = tmp.path().join(LOCAL_SOURCES_FILE);
        std::fs::write(&local, "{}").expect("write sources");

        assert_eq!(discover_sources_file(tmp.path()), Some(local));
    }

    #[test]
    fn test_discover_falls_back_to_home_config() {
        let data_dir = TempDir::new().expect("tempdir");
        let home = TempDir::new().expect("tempdir");
        let config_dir = home.path().join(".config").join("bikeshare");
        std::fs::create_dir_all(&config_dir).expect("create config dir");
        let user = config_dir.join("sources.json");
        std::fs::write(&user, "{}").expect("write sources");

        // Override HOME so that dirs::home_dir() resolves to our temp dir.
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", home.path());

        let found = discover_sources_file(data_dir.path());

        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }

        assert_eq!(found, Some(user));
    }

    // ── resolve_sources ───────────────────────────────────────────────────────

    #[test]
    fn test_resolve_sources_defaults_to_data_dir() {
        let tmp = TempDir::new().expect("tempdir");
        // An empty local override file keeps discovery away from $HOME.
        std::fs::write(tmp.path().join(LOCAL_SOURCES_FILE), "{}").expect("write sources");
        let settings = Settings::from_args([
            "bikeshare",
            "--data-dir",
            tmp.path().to_str().expect("utf-8 path"),
        ]);

        let sources = resolve_sources(&settings).expect("defaults should resolve");
        assert_eq!(
            sources.path_for(City::Chicago).unwrap(),
            tmp.path().join("chicago.csv")
        );
        assert_eq!(
            sources.path_for(City::NewYorkCity).unwrap(),
            tmp.path().join("new_york_city.csv")
        );
    }

    #[test]
    fn test_resolve_sources_applies_explicit_file() {
        let tmp = TempDir::new().expect("tempdir");
        let overrides = tmp.path().join("custom.json");
        std::fs::write(&overrides, r#"{"washington": "dc/2017.csv"}"#).expect("write sources");

        let settings = Settings::from_args([
            "bikeshare",
            "--data-dir",
            "/srv/bikeshare",
            "--sources",
            overrides.to_str().expect("utf-8 path"),
        ]);

        let sources = resolve_sources(&settings).expect("overrides should resolve");
        assert_eq!(
            sources.path_for(City::Washington).unwrap(),
            tmp.path().join("dc/2017.csv")
        );
        assert_eq!(
            sources.path_for(City::Chicago).unwrap(),
            Path::new("/srv/bikeshare/chicago.csv")
        );
    }
}
