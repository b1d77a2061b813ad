//! Codewar Core Library
//!
//! Room model, round state machine, permissions and storage for Codewar,
//! a four-player code-breaking party game played through a shared room
//! store rather than a game server.

pub mod config;
pub mod error;
pub mod game;
pub mod invariants;
pub mod models;
pub mod permissions;
pub mod rng;
pub mod service;
pub mod storage;
pub mod view;
pub mod words;

pub use config::{GameConfig, StoreBackend, StoreConfig};
pub use error::{Error, Result};
pub use game::{
    digits_of, GuessOutcome, InterceptChoice, InterceptOutcome, JoinOutcome, RoundEnd,
};
pub use models::*;
pub use permissions::{ActionRules, GameAction};
pub use rng::{Randomness, ScriptedRandomness, SystemRandomness};
pub use service::{Applied, ConfiguredService, RoomService};
pub use storage::{JsonFileStore, MemoryRoomStore, RoomMap, RoomStore, SqliteRoomStore};
pub use view::RoomView;
pub use words::{StaticWordSupply, WordSupply, FALLBACK_WORDS};
