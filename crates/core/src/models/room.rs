//! Room model - one game session's complete persisted state

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Phase, Role, RoomStatus, Team};

/// Seats in a room
pub const MAX_PLAYERS: usize = 4;
/// Secret words dealt to each team
pub const WORDS_PER_TEAM: usize = 4;
/// Digits in a round's code
pub const CODE_LENGTH: usize = 3;
/// Counter value that ends the game
pub const WIN_THRESHOLD: u32 = 2;

/// Per-team counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScore {
    /// Successful interceptions made by this team
    pub intercepts: u32,
    /// Rounds this team's decoder got wrong
    pub fails: u32,
}

/// A game room, keyed by its room code in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub players: Vec<String>,
    /// Word pool key chosen at creation
    #[serde(default)]
    pub difficulty: String,
    pub status: RoomStatus,
    #[serde(default)]
    pub teams: BTreeMap<String, Team>,
    #[serde(default)]
    pub roles: BTreeMap<String, Role>,
    #[serde(default)]
    pub words: BTreeMap<Team, Vec<String>>,
    pub score: BTreeMap<Team, TeamScore>,
    pub turn: Team,
    pub phase: Phase,
    #[serde(default)]
    pub current_code: Vec<u8>,
    #[serde(default)]
    pub clues: Vec<String>,
    #[serde(default)]
    pub logs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Team>,
}

impl Room {
    /// A fresh room in the waiting lobby with its creator seated
    pub fn new(creator: impl Into<String>, difficulty: impl Into<String>) -> Self {
        let score = Team::all()
            .iter()
            .map(|team| (*team, TeamScore::default()))
            .collect();

        Self {
            players: vec![creator.into()],
            difficulty: difficulty.into(),
            status: RoomStatus::Waiting,
            teams: BTreeMap::new(),
            roles: BTreeMap::new(),
            words: BTreeMap::new(),
            score,
            turn: Team::Black,
            phase: Phase::Encoding,
            current_code: Vec::new(),
            clues: Vec::new(),
            logs: Vec::new(),
            winner: None,
        }
    }

    pub fn is_member(&self, player: &str) -> bool {
        self.players.iter().any(|p| p == player)
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS
    }

    pub fn team_of(&self, player: &str) -> Option<Team> {
        self.teams.get(player).copied()
    }

    pub fn role_of(&self, player: &str) -> Option<Role> {
        self.roles.get(player).copied()
    }

    /// Members of a team in seating order
    pub fn members_of(&self, team: Team) -> Vec<&str> {
        self.players
            .iter()
            .filter(|p| self.team_of(p) == Some(team))
            .map(String::as_str)
            .collect()
    }

    /// The player on `team` currently holding `role`
    pub fn player_with(&self, team: Team, role: Role) -> Option<&str> {
        self.players
            .iter()
            .find(|p| self.team_of(p) == Some(team) && self.role_of(p) == Some(role))
            .map(String::as_str)
    }

    pub fn active_encoder(&self) -> Option<&str> {
        self.player_with(self.turn, Role::Encoder)
    }

    pub fn active_decoder(&self) -> Option<&str> {
        self.player_with(self.turn, Role::Decoder)
    }

    /// Counters for a team (zero if never recorded)
    pub fn score_of(&self, team: Team) -> TeamScore {
        self.score.get(&team).copied().unwrap_or_default()
    }

    pub(crate) fn score_mut(&mut self, team: Team) -> &mut TeamScore {
        self.score.entry(team).or_default()
    }

    /// A team's secret words (empty before the game starts)
    pub fn words_of(&self, team: Team) -> &[String] {
        self.words.get(&team).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_code(&self) -> bool {
        !self.current_code.is_empty()
    }

    /// Event log in display order
    pub fn logs_newest_first(&self) -> impl Iterator<Item = &str> {
        self.logs.iter().rev().map(String::as_str)
    }

    pub(crate) fn log(&mut self, entry: impl Into<String>) {
        self.logs.push(entry.into());
    }
}
