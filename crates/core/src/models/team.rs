//! Team, role, status and phase enums

use serde::{Deserialize, Serialize};

/// The two sides of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Team {
    Black,
    White,
}

impl Team {
    pub fn display_name(&self) -> &'static str {
        match self {
            Team::Black => "Black Team",
            Team::White => "White Team",
        }
    }

    /// The other team
    pub fn opponent(&self) -> Team {
        match self {
            Team::Black => Team::White,
            Team::White => Team::Black,
        }
    }

    /// Both teams in seating order
    pub fn all() -> &'static [Team] {
        &[Team::Black, Team::White]
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A player's role within their team for the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Picks up the code and writes the clues
    Encoder,
    /// Guesses the code from the clues
    Decoder,
}

impl Role {
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Encoder => "Encoder",
            Role::Decoder => "Decoder",
        }
    }

    /// Role held after a rotation
    pub fn swapped(&self) -> Role {
        match self {
            Role::Encoder => Role::Decoder,
            Role::Decoder => Role::Encoder,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Room lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Waiting,
    Playing,
    #[serde(rename = "GAMEOVER")]
    GameOver,
}

impl RoomStatus {
    /// Stored form, identical to the serialized name
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Waiting => "WAITING",
            RoomStatus::Playing => "PLAYING",
            RoomStatus::GameOver => "GAMEOVER",
        }
    }
}

/// Sub-stage of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Active encoder is drawing the code and writing clues
    Encoding,
    /// Clues broadcast, the opposing team may intercept
    ClueGiven,
    /// Active decoder resolves the round
    Guess,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&Team::Black).unwrap(), "\"BLACK\"");
        assert_eq!(serde_json::to_string(&Role::Encoder).unwrap(), "\"ENCODER\"");
        assert_eq!(
            serde_json::to_string(&RoomStatus::GameOver).unwrap(),
            "\"GAMEOVER\""
        );
        for status in [RoomStatus::Waiting, RoomStatus::Playing, RoomStatus::GameOver] {
            assert_eq!(
                serde_json::to_value(status).unwrap(),
                serde_json::json!(status.as_str())
            );
        }
        assert_eq!(
            serde_json::to_string(&Phase::ClueGiven).unwrap(),
            "\"CLUE_GIVEN\""
        );
    }

    #[test]
    fn test_opponent_and_swap() {
        assert_eq!(Team::Black.opponent(), Team::White);
        assert_eq!(Team::White.opponent(), Team::Black);
        assert_eq!(Role::Encoder.swapped(), Role::Decoder);
        assert_eq!(Role::Decoder.swapped().swapped(), Role::Decoder);
    }
}
