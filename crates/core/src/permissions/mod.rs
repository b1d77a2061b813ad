//! Who may act, and when
//!
//! Every round intent is legal for exactly one seat (or one team) in one
//! phase. The rules live here so the game transitions and the player view
//! agree on them.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{Phase, Role, Room, RoomStatus, MAX_PLAYERS};

/// Actions a seated player can take in a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameAction {
    /// Deal teams, roles and words
    StartGame,
    /// See (and if needed draw) this round's code
    DrawCode,
    /// Broadcast the three clues
    SubmitClues,
    /// Guess the opposing team's code, or pass
    Intercept,
    /// Resolve the round as the active decoder
    Guess,
}

impl GameAction {
    /// Round actions in the order they occur
    pub fn round_order() -> &'static [GameAction] {
        &[
            GameAction::DrawCode,
            GameAction::SubmitClues,
            GameAction::Intercept,
            GameAction::Guess,
        ]
    }
}

/// Rule table for room actions
pub struct ActionRules;

impl ActionRules {
    /// Check whether `player` may perform `action` on `room` right now
    pub fn check(room: &Room, player: &str, action: GameAction) -> Result<()> {
        if !room.is_member(player) {
            return Err(illegal(format!("{player} is not seated in this room")));
        }

        if action == GameAction::StartGame {
            return Self::check_start(room);
        }

        match room.status {
            RoomStatus::Playing => {}
            RoomStatus::Waiting => return Err(illegal("the game has not started")),
            RoomStatus::GameOver => return Err(illegal("the game is over")),
        }

        let team = room
            .team_of(player)
            .ok_or_else(|| illegal(format!("{player} has no team")))?;
        let role = room.role_of(player);
        let on_turn = team == room.turn;

        let (phase, allowed, who) = match action {
            GameAction::DrawCode | GameAction::SubmitClues => (
                Phase::Encoding,
                on_turn && role == Some(Role::Encoder),
                "the active encoder",
            ),
            GameAction::Intercept => (Phase::ClueGiven, !on_turn, "the opposing team"),
            GameAction::Guess => (
                Phase::Guess,
                on_turn && role == Some(Role::Decoder),
                "the active decoder",
            ),
            GameAction::StartGame => return Self::check_start(room),
        };

        if room.phase != phase {
            return Err(illegal(format!(
                "{action:?} is not allowed during {:?}",
                room.phase
            )));
        }
        if !allowed {
            return Err(illegal(format!("only {who} may {action:?}")));
        }

        Ok(())
    }

    fn check_start(room: &Room) -> Result<()> {
        match room.status {
            RoomStatus::Waiting if room.players.len() == MAX_PLAYERS => Ok(()),
            RoomStatus::Waiting => Err(illegal(format!(
                "waiting for {} more players",
                MAX_PLAYERS - room.players.len()
            ))),
            _ => Err(illegal("the game has already started")),
        }
    }

    pub fn can_perform(room: &Room, player: &str, action: GameAction) -> bool {
        Self::check(room, player, action).is_ok()
    }

    /// The action waiting on this player, if any
    ///
    /// Drawing the code is folded into clue submission and never reported.
    pub fn pending_for(room: &Room, player: &str) -> Option<GameAction> {
        std::iter::once(GameAction::StartGame)
            .chain(GameAction::round_order().iter().copied())
            .filter(|a| *a != GameAction::DrawCode)
            .find(|a| Self::can_perform(room, player, *a))
    }
}

fn illegal(reason: impl Into<String>) -> Error {
    Error::IllegalPhaseAction(reason.into())
}
