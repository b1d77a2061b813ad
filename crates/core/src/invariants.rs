//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible room states during development.
//! These checks are compiled out in release builds.

use std::collections::HashSet;

use crate::models::{
    Phase, Role, Room, RoomStatus, Team, CODE_LENGTH, MAX_PLAYERS, WORDS_PER_TEAM,
};

/// Validate that a Room's state is internally consistent
pub fn assert_room_invariants(room: &Room) {
    debug_assert!(
        room.players.len() <= MAX_PLAYERS,
        "Room has {} players, max is {}",
        room.players.len(),
        MAX_PLAYERS
    );

    let unique: HashSet<&String> = room.players.iter().collect();
    debug_assert!(
        unique.len() == room.players.len(),
        "Room has duplicate player names: {:?}",
        room.players
    );

    if room.status == RoomStatus::Waiting {
        debug_assert!(
            room.teams.is_empty() && room.roles.is_empty() && room.words.is_empty(),
            "Waiting room already has assignments"
        );
    } else {
        assert_team_invariants(room);
    }

    assert_code_invariants(&room.current_code);

    debug_assert!(
        room.clues.is_empty() || matches!(room.phase, Phase::ClueGiven | Phase::Guess),
        "Room has clues {:?} in phase {:?}",
        room.clues,
        room.phase
    );

    debug_assert!(
        (room.status == RoomStatus::GameOver) == room.winner.is_some(),
        "Room status {:?} inconsistent with winner {:?}",
        room.status,
        room.winner
    );
}

/// Validate team and role assignment once a game has started
pub fn assert_team_invariants(room: &Room) {
    for team in Team::all() {
        let members = room.members_of(*team);
        debug_assert!(
            members.len() == 2,
            "{} has {} members, expected 2",
            team,
            members.len()
        );

        let encoders = members
            .iter()
            .filter(|p| room.role_of(p) == Some(Role::Encoder))
            .count();
        let decoders = members
            .iter()
            .filter(|p| room.role_of(p) == Some(Role::Decoder))
            .count();
        debug_assert!(
            encoders == 1 && decoders == 1,
            "{} has {} encoders and {} decoders",
            team,
            encoders,
            decoders
        );

        debug_assert!(
            room.words_of(*team).len() == WORDS_PER_TEAM,
            "{} has {} words, expected {}",
            team,
            room.words_of(*team).len(),
            WORDS_PER_TEAM
        );
    }
}

/// Validate that a code is empty or three distinct digits from 1 to 4
pub fn assert_code_invariants(code: &[u8]) {
    if code.is_empty() {
        return;
    }

    debug_assert!(
        code.len() == CODE_LENGTH,
        "Code {:?} has length {}, expected {}",
        code,
        code.len(),
        CODE_LENGTH
    );

    let distinct: HashSet<&u8> = code.iter().collect();
    debug_assert!(
        distinct.len() == code.len() && code.iter().all(|d| (1..=4).contains(d)),
        "Code {:?} must hold distinct digits from 1 to 4",
        code
    );
}
