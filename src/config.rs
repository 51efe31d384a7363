use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::data::City;

/// Rows per raw-data page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 300_000;

/// Where each city's data lives and how raw rows are paged.
///
/// Built once at startup and passed to the loader by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base directory for relative city paths.
    pub data_dir: PathBuf,
    pub cities: HashMap<City, PathBuf>,
    pub page_size: usize,
}

/// On-disk config. Every key is optional; `cities` entries are merged over the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    cities: HashMap<City, PathBuf>,
    page_size: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            cities: City::ALL
                .iter()
                .map(|c| (*c, PathBuf::from(c.default_file())))
                .collect(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Defaults, then the file named by `BIKESHARE_CONFIG`, then
    /// `BIKESHARE_DATA_DIR` / `BIKESHARE_PAGE_SIZE`.
    pub fn load() -> Result<Self> {
        let mut config = match env::var("BIKESHARE_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok())?;
        info!(data_dir = %config.data_dir.display(), page_size = config.page_size, "config loaded");
        Ok(config)
    }

    /// Read a JSON (`.json`) or YAML (anything else) config file over the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let file: ConfigFile = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&text)
                .with_context(|| format!("parsing JSON config {}", path.display()))?,
            _ => serde_yaml::from_str(&text)
                .with_context(|| format!("parsing YAML config {}", path.display()))?,
        };

        let mut config = Self::default();
        if let Some(dir) = file.data_dir {
            config.data_dir = dir;
        }
        config.cities.extend(file.cities);
        if let Some(size) = file.page_size {
            config.page_size = size;
        }
        config.validate()?;
        Ok(config)
    }

    /// Apply `BIKESHARE_DATA_DIR` / `BIKESHARE_PAGE_SIZE` as looked up by `get`.
    pub fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(dir) = get("BIKESHARE_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(size) = get("BIKESHARE_PAGE_SIZE") {
            self.page_size = size
                .trim()
                .parse()
                .with_context(|| format!("BIKESHARE_PAGE_SIZE={size:?} is not a row count"))?;
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        Ok(())
    }

    /// Resolved path of the city's CSV, if one is mapped.
    pub fn path_for(&self, city: City) -> Option<PathBuf> {
        self.cities.get(&city).map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                self.data_dir.join(p)
            }
        })
    }
}
