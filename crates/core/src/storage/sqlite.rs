//! SQLite room store
//!
//! One row per room holding the room's JSON. Saves still replace the whole
//! collection, inside a single transaction.

use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::{instrument, warn};

use super::migrations;
use super::{RoomMap, RoomStore};
use crate::error::{Error, Result};
use crate::models::{Room, RoomStatus};

/// How long a save waits on another client's write lock before giving up
const BUSY_TIMEOUT: Duration = Duration::from_millis(250);

pub struct SqliteRoomStore {
    conn: Connection,
}

impl SqliteRoomStore {
    /// Open or create a store at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        migrations::run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Open in-memory store (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        migrations::run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Get current schema version
    pub fn schema_version(&self) -> u32 {
        migrations::current_version(&self.conn).unwrap_or(0)
    }

    /// Room codes currently in a given status, e.g. open lobbies
    #[instrument(skip(self))]
    pub fn room_ids_with_status(&self, status: RoomStatus) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM rooms WHERE status = ?1 ORDER BY id")?;
        let ids = stmt
            .query_map(params![status.as_str()], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(ids)
    }

    fn read_rows(&self) -> Result<Vec<(String, String)>> {
        let mut stmt = self.conn.prepare("SELECT id, data FROM rooms ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn write_rows(&self, rooms: &RoomMap) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM rooms", [])?;

        let now = Utc::now().to_rfc3339();
        for (room_id, room) in rooms {
            tx.execute(
                "INSERT INTO rooms (id, data, status, updated_at) VALUES (?1, ?2, ?3, ?4)",
                params![
                    room_id,
                    serde_json::to_string(room)?,
                    room.status.as_str(),
                    now,
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }
}

impl RoomStore for SqliteRoomStore {
    #[instrument(skip(self))]
    fn load_all(&self) -> RoomMap {
        let rows = match self.read_rows() {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "Room table unreadable, treating as empty");
                return RoomMap::new();
            }
        };

        rows.into_iter()
            .filter_map(|(room_id, data)| match serde_json::from_str::<Room>(&data) {
                Ok(room) => Some((room_id, room)),
                Err(e) => {
                    warn!(room_id = %room_id, error = %e, "Skipping corrupt room row");
                    None
                }
            })
            .collect()
    }

    #[instrument(skip(self, rooms), fields(rooms = rooms.len()))]
    fn save_all(&self, rooms: &RoomMap) -> Result<()> {
        self.write_rows(rooms).map_err(|e| {
            warn!(error = %e, "Failed to write room table");
            Error::StoreUnavailable(e.to_string())
        })
    }
}
