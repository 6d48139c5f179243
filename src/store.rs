use crate::config::DEFAULT_SUCCESS_THRESHOLD;
use crate::error::{Error, Result};
use crate::results::ComparisonResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Key holding the last-used sources and threshold
pub const SETTINGS_KEY: &str = "pageCompareSettings";

/// Key holding the last comparison result
pub const RESULTS_KEY: &str = "pageCompareResults";

/// String-keyed store of JSON values, used to persist the last-used
/// settings and the last comparison result
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Store backed by a single JSON object on disk
///
/// Every write rewrites the whole file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the store, starting empty if the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => Map::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(Error::io(&path, e)),
        };
        ::log::debug!("Opened state file {} ({} keys)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, contents).map_err(|e| Error::io(&self.path, e))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

/// Last-used inputs, restored when a run names no sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSettings {
    /// Pre-go-live source as last entered
    #[serde(default)]
    pub pre_go_live_url: String,

    /// Current source as last entered
    #[serde(default)]
    pub current_url: String,

    /// Threshold of the last run
    #[serde(default = "default_success_threshold")]
    pub success_threshold: u8,
}

fn default_success_threshold() -> u8 {
    DEFAULT_SUCCESS_THRESHOLD
}

/// A comparison result stamped with the time it was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedResult {
    #[serde(flatten)]
    pub result: ComparisonResult,

    /// Threshold the result was judged against
    pub threshold: u8,

    /// When the comparison finished
    pub timestamp: DateTime<Utc>,
}

pub fn save_settings<S: KeyValueStore + ?Sized>(store: &mut S, settings: &SavedSettings) -> Result<()> {
    store.set(SETTINGS_KEY, serde_json::to_value(settings)?)
}

pub fn load_settings<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<SavedSettings>> {
    load(store, SETTINGS_KEY)
}

pub fn save_result<S: KeyValueStore + ?Sized>(store: &mut S, saved: &SavedResult) -> Result<()> {
    store.set(RESULTS_KEY, serde_json::to_value(saved)?)
}

pub fn last_result<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<SavedResult>> {
    load(store, RESULTS_KEY)
}

/// Forget the last result; saved settings are kept
pub fn clear_results<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<()> {
    store.remove(RESULTS_KEY)
}

fn load<S, T>(store: &S, key: &str) -> Result<Option<T>>
where
    S: KeyValueStore + ?Sized,
    T: for<'de> Deserialize<'de>,
{
    match store.get(key)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}
