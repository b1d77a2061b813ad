//! Game configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no
//! file at all) gives a working JSON-backed setup in the platform data
//! directory:
//!
//! ```toml
//! poll_interval_secs = 2
//! default_difficulty = "easy"
//!
//! [store]
//! backend = "sqlite"
//! path = "/var/lib/codewar/rooms.db"
//!
//! [words]
//! easy = ["apple", "banana", "melon", "grape", "cat", "dog", "rabbit", "bird"]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::storage::{JsonFileStore, RoomStore, SqliteRoomStore};
use crate::words::StaticWordSupply;

/// Which medium rooms are persisted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Json,
    Sqlite,
}

impl StoreBackend {
    fn default_file_name(&self) -> &'static str {
        match self {
            StoreBackend::Json => "rooms.json",
            StoreBackend::Sqlite => "rooms.db",
        }
    }
}

/// Store section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Explicit location; defaults to the platform data directory
    pub path: Option<PathBuf>,
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// How often clients should reload the room; the only bound on how
    /// stale a client's view can get
    pub poll_interval_secs: u64,
    /// Difficulty offered when creating a room
    pub default_difficulty: String,
    pub store: StoreConfig,
    /// Inline word pools by difficulty
    pub words: BTreeMap<String, Vec<String>>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 2,
            default_difficulty: "easy".to_string(),
            store: StoreConfig::default(),
            words: BTreeMap::new(),
        }
    }
}

impl GameConfig {
    /// Parse configuration from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        info!(path = %path.display(), "Loaded game config");
        Ok(config)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    /// Where the room store lives
    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.store.path {
            Some(path) => Ok(path.clone()),
            None => Ok(default_data_dir()?.join(self.store.backend.default_file_name())),
        }
    }

    /// Open the configured room store
    pub fn open_store(&self) -> Result<Box<dyn RoomStore>> {
        let path = self.store_path()?;
        info!(backend = ?self.store.backend, path = %path.display(), "Opening room store");

        let store: Box<dyn RoomStore> = match self.store.backend {
            StoreBackend::Json => Box::new(JsonFileStore::new(path)),
            StoreBackend::Sqlite => Box::new(SqliteRoomStore::open(path)?),
        };
        Ok(store)
    }

    /// Word supply built from the inline pools
    pub fn word_supply(&self) -> StaticWordSupply {
        StaticWordSupply::new(self.words.clone())
    }
}

/// Platform data directory for Codewar
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("dev", "onyx", "codewar").ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine data directory",
        ))
    })?;

    Ok(dirs.data_dir().to_path_buf())
}
