//! # Persistence
//!
//! Preferences and scores are stored as JSON documents under string keys.
//! [`FileStore`] keeps one `<key>.json` file per key in a data directory;
//! [`MemoryStore`] keeps them in a map for tests and ephemeral sessions.
//!
//! Loading never fails from the caller's point of view: a missing or
//! malformed record yields the default record.

use crate::error::{DenError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const PREFERENCES_KEY: &str = "preferences";
pub const STATISTICS_KEY: &str = "statistics";

/// String-keyed document storage
pub trait KeyValueStore {
    /// Raw document under `key`, or None if nothing was saved
    fn load(&self, key: &str) -> Result<Option<String>>;

    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(DenError::InvalidKey(key.to_string()))
    }
}

/// One JSON file per key under a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// The directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(DenError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let io_err = |source| DenError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.root).map_err(io_err)?;
        fs::write(&path, value).map_err(io_err)
    }
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Colour scheme choice
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub theme: Theme,
    /// Slug of the game played last, see `GameKind::slug`
    pub last_active_game: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicTacToeStats {
    pub player_wins: u32,
    pub ai_wins: u32,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArcadeStats {
    pub high_score: u32,
    pub lives: u32,
}

impl Default for ArcadeStats {
    fn default() -> Self {
        Self {
            high_score: 0,
            lives: crate::games::arcade::INITIAL_LIVES,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChessStats {
    pub games_played: u32,
    pub wins: u32,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    pub tic_tac_toe: TicTacToeStats,
    pub arcade: ArcadeStats,
    pub chess: ChessStats,
}

/// Reads and decodes the record under `key`.
pub fn load_record<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    let Some(text) = store.load(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| DenError::Json {
            key: key.to_string(),
            source,
        })
}

/// Encodes and writes `record` under `key`.
pub fn save_record<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, record: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(record).map_err(|source| DenError::Json {
        key: key.to_string(),
        source,
    })?;
    store.save(key, &text)
}

fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    match load_record(store, key) {
        Ok(Some(record)) => record,
        Ok(None) => {
            debug!(key, "no saved record, using defaults");
            T::default()
        }
        Err(e) => {
            warn!(key, error = %e, "could not load saved record, using defaults");
            T::default()
        }
    }
}

pub fn load_preferences(store: &dyn KeyValueStore) -> Preferences {
    load_or_default(store, PREFERENCES_KEY)
}

pub fn load_statistics(store: &dyn KeyValueStore) -> Statistics {
    load_or_default(store, STATISTICS_KEY)
}
