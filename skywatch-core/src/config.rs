use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::effects::CityStore;

/// Top-level configuration stored on disk.
///
/// Doubles as the dashboard's durable key-value storage: `city` is the last
/// successfully fetched city, read once at startup and rewritten after every
/// successful current-weather fetch.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeather API key. The CLI also honors the `OPENWEATHER_API_KEY`
    /// environment variable over this field.
    pub api_key: Option<String>,

    /// Last successfully fetched city.
    pub city: Option<String>,
}

impl Config {
    /// Load config from the default location, or return an empty default if
    /// it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load config from an explicit path. Missing file means first run.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the default location, creating parent directories as
    /// needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skywatch", "skywatch")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// [`CityStore`] backed by the config file.
///
/// Reads and rewrites the whole file on each access; the file is tiny and a
/// cycle touches it once, so there is no point caching.
#[derive(Debug, Clone)]
pub struct FileCityStore {
    path: PathBuf,
}

impl FileCityStore {
    pub fn new() -> Result<Self> {
        Ok(Self { path: Config::config_file_path()? })
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CityStore for FileCityStore {
    fn load(&self) -> Option<String> {
        Config::load_from(&self.path).ok().and_then(|cfg| cfg.city)
    }

    fn save(&mut self, city: &str) -> Result<()> {
        let mut cfg = Config::load_from(&self.path).unwrap_or_default();
        cfg.city = Some(city.to_string());
        cfg.save_to(&self.path)
    }
}
