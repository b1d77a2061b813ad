//! Room persistence
//!
//! Every backend stores the whole room collection and is read and written
//! as a unit. There is no locking or version check: two clients saving
//! inside the same load/save window race, and the last save wins.

mod json_file;
mod memory;
mod migrations;
mod sqlite;

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::models::Room;

pub use json_file::JsonFileStore;
pub use memory::MemoryRoomStore;
pub use sqlite::SqliteRoomStore;

/// All rooms keyed by room code
pub type RoomMap = BTreeMap<String, Room>;

/// Whole-collection room storage
///
/// `load_all` never fails: a missing, unreadable or corrupt store is
/// reported as an empty collection. The per-room helpers are each one full
/// load followed (when needed) by one full save.
pub trait RoomStore {
    /// Load every room
    fn load_all(&self) -> RoomMap;

    /// Replace the stored collection
    fn save_all(&self, rooms: &RoomMap) -> Result<()>;

    /// Fetch one room
    fn get(&self, room_id: &str) -> Option<Room> {
        self.load_all().remove(room_id)
    }

    /// Insert or replace one room
    fn put(&self, room_id: &str, room: Room) -> Result<()> {
        let mut rooms = self.load_all();
        rooms.insert(room_id.to_string(), room);
        self.save_all(&rooms)
    }

    /// Delete a room; returns whether it existed
    fn remove(&self, room_id: &str) -> Result<bool> {
        let mut rooms = self.load_all();
        if rooms.remove(room_id).is_none() {
            return Ok(false);
        }
        self.save_all(&rooms)?;
        Ok(true)
    }

    /// Load, mutate one existing room, save
    ///
    /// Nothing is written when `apply` fails or the room is missing.
    fn update<T, F>(&self, room_id: &str, apply: F) -> Result<(Room, T)>
    where
        Self: Sized,
        F: FnOnce(&mut Room) -> Result<T>,
    {
        let mut rooms = self.load_all();
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| Error::RoomNotFound(room_id.to_string()))?;
        let value = apply(room)?;
        let snapshot = room.clone();
        self.save_all(&rooms)?;
        Ok((snapshot, value))
    }
}

impl<S: RoomStore + ?Sized> RoomStore for &S {
    fn load_all(&self) -> RoomMap {
        (**self).load_all()
    }

    fn save_all(&self, rooms: &RoomMap) -> Result<()> {
        (**self).save_all(rooms)
    }
}

impl<S: RoomStore + ?Sized> RoomStore for Box<S> {
    fn load_all(&self) -> RoomMap {
        (**self).load_all()
    }

    fn save_all(&self, rooms: &RoomMap) -> Result<()> {
        (**self).save_all(rooms)
    }
}
