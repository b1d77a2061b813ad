//! In-process room store
//!
//! Behaves like the file-backed stores (whole-collection load and save) but
//! keeps the collection in memory. Useful for tests and for
//! embedding the game without touching disk.

use std::cell::RefCell;

use super::{RoomMap, RoomStore};
use crate::error::Result;

#[derive(Debug, Default)]
pub struct MemoryRoomStore {
    rooms: RefCell<RoomMap>,
}

impl MemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing collection
    pub fn with_rooms(rooms: RoomMap) -> Self {
        Self {
            rooms: RefCell::new(rooms),
        }
    }
}

impl RoomStore for MemoryRoomStore {
    fn load_all(&self) -> RoomMap {
        self.rooms.borrow().clone()
    }

    fn save_all(&self, rooms: &RoomMap) -> Result<()> {
        *self.rooms.borrow_mut() = rooms.clone();
        Ok(())
    }
}
