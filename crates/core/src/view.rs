//! Per-player projection of a room
//!
//! A front end renders from a [`RoomView`] rather than from the raw room so
//! that secrets stay with the people allowed to see them: each team sees
//! only its own words, and the code is shown only to the encoder writing
//! clues for it.

use serde::Serialize;

use crate::models::{Phase, Role, Room, RoomStatus, Team, TeamScore};
use crate::permissions::{ActionRules, GameAction};

/// What one player may see of a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomView {
    pub room_id: String,
    pub player: String,
    pub status: RoomStatus,
    pub difficulty: String,
    pub players: Vec<String>,
    /// None for spectators and before the game starts
    pub my_team: Option<Team>,
    pub my_role: Option<Role>,
    pub turn: Team,
    pub phase: Phase,
    pub black_score: TeamScore,
    pub white_score: TeamScore,
    /// Own team's words; other teams' words are never included
    pub my_words: Vec<String>,
    /// Only for the active encoder while encoding
    pub secret_code: Option<Vec<u8>>,
    pub clues: Vec<String>,
    /// Newest first
    pub logs: Vec<String>,
    pub winner: Option<Team>,
    /// What this player is expected to do next
    pub pending: Option<GameAction>,
}

impl RoomView {
    pub fn for_player(room_id: &str, room: &Room, player: &str) -> Self {
        let my_team = room.team_of(player);
        let my_role = room.role_of(player);

        let my_words = my_team
            .map(|team| room.words_of(team).to_vec())
            .unwrap_or_default();

        let is_active_encoder = room.status == RoomStatus::Playing
            && room.phase == Phase::Encoding
            && room.active_encoder() == Some(player);
        let secret_code = (is_active_encoder && room.has_code())
            .then(|| room.current_code.clone());

        Self {
            room_id: room_id.to_string(),
            player: player.to_string(),
            status: room.status,
            difficulty: room.difficulty.clone(),
            players: room.players.clone(),
            my_team,
            my_role,
            turn: room.turn,
            phase: room.phase,
            black_score: room.score_of(Team::Black),
            white_score: room.score_of(Team::White),
            my_words,
            secret_code,
            clues: room.clues.clone(),
            logs: room.logs_newest_first().map(str::to_string).collect(),
            winner: room.winner,
            pending: ActionRules::pending_for(room, player),
        }
    }

    pub fn is_spectator(&self) -> bool {
        !self.players.contains(&self.player)
    }

    /// One-line status for the waiting area or the round banner
    pub fn headline(&self) -> String {
        match self.status {
            RoomStatus::Waiting => format!(
                "Waiting for players ({}/{})",
                self.players.len(),
                crate::models::MAX_PLAYERS
            ),
            RoomStatus::Playing => match self.pending {
                Some(GameAction::SubmitClues) => "Your turn: write three clues".to_string(),
                Some(GameAction::Intercept) => "You may try to intercept".to_string(),
                Some(GameAction::Guess) => "Your turn: guess the code".to_string(),
                _ => format!("{}: {:?}", self.turn, self.phase),
            },
            RoomStatus::GameOver => match self.winner {
                Some(winner) => format!("Game over, {winner} wins"),
                None => "Game over".to_string(),
            },
        }
    }
}
