//! Dashboard preferences, persisted as one JSON document under a fixed key.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const SETTINGS_KEY: &str = "dynamo-settings";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings storage failed: {0}")]
    Io(#[from] io::Error),
    #[error("stored settings have an unexpected shape: {0}")]
    Json(#[from] serde_json::Error),
}

/// String storage addressed by key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), SettingsError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SettingsError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// One `<key>.json` file per key inside `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        match fs::read_to_string(self.path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SettingsError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), value)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    // filters
    pub default_year: i32,
    pub default_month: String,
    pub show_empty_filters: bool,
    pub auto_refresh: bool,
    /// Seconds.
    pub refresh_interval: u32,

    // charts
    pub chart_animation: bool,
    pub chart_colors: String,
    pub chart_style: String,
    pub show_data_labels: bool,

    // data
    pub date_format: String,
    pub number_format: String,
    pub currency_symbol: String,
    pub decimal_places: u32,

    // interface
    pub theme: String,
    pub language: String,
    pub sidebar_collapsed: bool,
    pub show_tooltips: bool,
    pub dark_mode: bool,
    pub notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_year: 2024,
            default_month: "febrero".to_string(),
            show_empty_filters: true,
            auto_refresh: false,
            refresh_interval: 30,
            chart_animation: true,
            chart_colors: "green".to_string(),
            chart_style: "modern".to_string(),
            show_data_labels: true,
            date_format: "dd/mm/yyyy".to_string(),
            number_format: "es-PY".to_string(),
            currency_symbol: "Gs.".to_string(),
            decimal_places: 0,
            theme: "light".to_string(),
            language: "es".to_string(),
            sidebar_collapsed: false,
            show_tooltips: true,
            dark_mode: false,
            notifications: true,
        }
    }
}

impl Settings {
    /// Defaults when nothing has been saved yet. Missing fields in a stored
    /// document take their default value.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self, SettingsError> {
        match store.get(SETTINGS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => {
                debug!("no stored settings, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), SettingsError> {
        store.set(SETTINGS_KEY, serde_json::to_string_pretty(self)?)
    }
}
