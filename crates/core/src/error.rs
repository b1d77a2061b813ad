//! Error types for Codewar Core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Room already exists: {0}")]
    RoomExists(String),

    #[error("Room not found: {0}")]
    RoomNotFound(String),

    #[error("Room is full: {0}")]
    RoomFull(String),

    #[error("Invalid clue: {0}")]
    InvalidClue(String),

    #[error("Guess must not be blank")]
    InvalidGuess,

    #[error("Illegal action: {0}")]
    IllegalPhaseAction(String),

    #[error("Room {room_id} needs 4 players to start, has {count}")]
    NotEnoughPlayers { room_id: String, count: usize },

    #[error("Room store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl Error {
    /// Domain rejections a client can show to the user and retry
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::RoomExists(_)
                | Error::RoomNotFound(_)
                | Error::RoomFull(_)
                | Error::InvalidClue(_)
                | Error::InvalidGuess
                | Error::IllegalPhaseAction(_)
                | Error::NotEnoughPlayers { .. }
                | Error::StoreUnavailable(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
