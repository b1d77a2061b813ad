//! JSON file room store
//!
//! The whole collection lives in one pretty-printed JSON object keyed by
//! room code, so saved games can be inspected and edited by hand.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, instrument, warn};

use super::{RoomMap, RoomStore};
use crate::error::{Error, Result};

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by `path`; the file is created on first save
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<RoomMap> {
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write(&self, rooms: &RoomMap) -> Result<()> {
        let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };

        // Every save stages in its own file beside the target; readers never
        // observe a half-written file
        let mut staging = NamedTempFile::new_in(parent)?;
        staging.write_all(serde_json::to_string_pretty(rooms)?.as_bytes())?;
        staging.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl RoomStore for JsonFileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load_all(&self) -> RoomMap {
        match self.read() {
            Ok(rooms) => rooms,
            Err(Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
                debug!("Room file does not exist yet");
                RoomMap::new()
            }
            Err(e) => {
                warn!(error = %e, "Room file unreadable, treating as empty");
                RoomMap::new()
            }
        }
    }

    #[instrument(skip(self, rooms), fields(path = %self.path.display(), rooms = rooms.len()))]
    fn save_all(&self, rooms: &RoomMap) -> Result<()> {
        self.write(rooms).map_err(|e| {
            warn!(error = %e, "Failed to write room file");
            Error::StoreUnavailable(e.to_string())
        })
    }
}
