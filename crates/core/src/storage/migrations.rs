//! Room table schema
//!
//! Schema steps are applied in order and the reached step is kept in
//! SQLite's `user_version`, so a database file always knows how far it got.

use rusqlite::Connection;
use tracing::{info, instrument};

use crate::error::Result;

/// Schema steps; step `n` brings the database to version `n + 1`
const SCHEMA: &[&str] = &[r#"
    -- One row per room, the room itself stored as JSON
    CREATE TABLE IF NOT EXISTS rooms (
        id TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'WAITING',
        updated_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_rooms_status ON rooms(status);
"#];

pub(super) fn latest_version() -> u32 {
    SCHEMA.len() as u32
}

pub(super) fn current_version(conn: &Connection) -> Result<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Bring the room schema up to date
#[instrument(skip(conn))]
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let from = current_version(conn)?;
    if from < latest_version() {
        info!(from, to = latest_version(), "Updating room schema");
    }

    for (version, sql) in (1u32..).zip(SCHEMA).skip(from as usize) {
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;
        info!(version, "Applied room schema step");
    }

    Ok(())
}
