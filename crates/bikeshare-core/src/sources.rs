//! Registry mapping each [`City`] to the CSV file holding its trips.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{BikeshareError, Result};
use crate::models::City;

/// On-disk override document: `{"<city>": "<path>"}`.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct SourceOverrides(BTreeMap<City, PathBuf>);

/// City → source file mapping handed to the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    paths: BTreeMap<City, PathBuf>,
}

impl DataSources {
    /// Registry with no cities configured.
    pub fn empty() -> Self {
        Self {
            paths: BTreeMap::new(),
        }
    }

    /// Registry pointing every city at its default file name inside `dir`.
    pub fn from_dir(dir: &Path) -> Self {
        let paths = City::ALL
            .into_iter()
            .map(|city| (city, dir.join(city.default_file_name())))
            .collect();
        Self { paths }
    }

    /// Replace (or add) the file used for `city`.
    pub fn with_path(mut self, city: City, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(city, path.into());
        self
    }

    /// Apply overrides from a JSON object such as
    /// `{"chicago": "data/chicago_2017.csv"}`.
    ///
    /// Keys are matched like prompt input (case-insensitive). Relative paths
    /// are resolved against the directory containing `file`.
    pub fn load_overrides(mut self, file: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(file).map_err(|source| BikeshareError::FileRead {
            path: file.to_path_buf(),
            source,
        })?;
        let SourceOverrides(overrides) = serde_json::from_str(&content).map_err(|e| {
            if e.is_data() {
                BikeshareError::Config(format!("{} in {}", e, file.display()))
            } else {
                BikeshareError::JsonParse(e)
            }
        })?;
        let base = file.parent().unwrap_or_else(|| Path::new("."));

        for (city, path) in overrides {
            let resolved = if path.is_relative() {
                base.join(path)
            } else {
                path
            };
            debug!("Source override: {} -> {}", city.key(), resolved.display());
            self.paths.insert(city, resolved);
        }

        Ok(self)
    }

    /// File backing `city`.
    pub fn path_for(&self, city: City) -> Result<&Path> {
        self.paths
            .get(&city)
            .map(PathBuf::as_path)
            .ok_or_else(|| BikeshareError::UnknownSource(city.key().to_string()))
    }
}
