//! Room state machine
//!
//! Pure transitions over a [`Room`] value. Each one validates first and only
//! then mutates, so a returned error leaves the room exactly as it was.
//! Persistence is the caller's concern (see [`crate::service`]).
//!
//! A round runs `Encoding -> ClueGiven -> Guess -> Encoding`, with the turn
//! passing to the other team and every role swapping when it wraps. The game
//! ends during guess resolution once any counter reaches the threshold.

mod guess;

pub use guess::{digits_of, format_code, matches_code};

use crate::error::{Error, Result};
use crate::invariants::assert_room_invariants;
use crate::models::{
    Phase, Role, Room, RoomStatus, Team, CODE_LENGTH, MAX_PLAYERS, WIN_THRESHOLD,
    WORDS_PER_TEAM,
};
use crate::permissions::{ActionRules, GameAction};
use crate::rng::Randomness;
use crate::words::{dealing_pool, WordSupply, WORDS_NEEDED};

/// Code digits are drawn from 1..=CODE_DIGITS
pub const CODE_DIGITS: usize = 4;

/// How a join request was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Took a new seat
    Joined,
    /// Already seated; nothing changed
    Rejoined,
}

/// The opposing team's response to broadcast clues
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptChoice {
    /// Free-text guess, parsed with [`digits_of`]
    Guess(String),
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptOutcome {
    Intercepted,
    Missed { guess: Vec<u8> },
    Skipped,
}

/// What happens after a guess is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    /// Turn passed to this team
    NextTurn(Team),
    GameOver { winner: Team },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    pub correct: bool,
    /// The code that was in play
    pub code: Vec<u8>,
    pub end: RoundEnd,
}

/// Seat a player, or recognise a returning one
pub fn join_room(room_id: &str, room: &mut Room, player: &str) -> Result<JoinOutcome> {
    if room.is_member(player) {
        return Ok(JoinOutcome::Rejoined);
    }
    if room.is_full() {
        return Err(Error::RoomFull(room_id.to_string()));
    }

    room.players.push(player.to_string());
    room.log(format!("{player} joined the room."));
    assert_room_invariants(room);
    Ok(JoinOutcome::Joined)
}

/// Shuffle seats into teams and roles, then deal each team its words
///
/// After the shuffle the first two seats form the Black team and the last
/// two the White team; the first seat of each team encodes first.
pub fn start_game<W, R>(room_id: &str, room: &mut Room, supply: &W, rng: &mut R) -> Result<()>
where
    W: WordSupply + ?Sized,
    R: Randomness + ?Sized,
{
    if room.status != RoomStatus::Waiting {
        return Err(Error::IllegalPhaseAction(
            "the game has already started".into(),
        ));
    }
    if room.players.len() != MAX_PLAYERS {
        return Err(Error::NotEnoughPlayers {
            room_id: room_id.to_string(),
            count: room.players.len(),
        });
    }

    let order = checked_permutation(rng.permutation(MAX_PLAYERS), MAX_PLAYERS);
    let seated: Vec<String> = order.iter().map(|i| room.players[*i].clone()).collect();

    let pool = dealing_pool(&supply, &room.difficulty);
    let picks = checked_sample(rng.sample(pool.len(), WORDS_NEEDED), pool.len(), WORDS_NEEDED);
    let dealt: Vec<String> = picks.iter().map(|i| pool[*i].clone()).collect();

    room.players = seated;
    for (seat, player) in room.players.iter().enumerate() {
        let team = if seat < MAX_PLAYERS / 2 {
            Team::Black
        } else {
            Team::White
        };
        let role = if seat % 2 == 0 {
            Role::Encoder
        } else {
            Role::Decoder
        };
        room.teams.insert(player.clone(), team);
        room.roles.insert(player.clone(), role);
    }

    room.words
        .insert(Team::Black, dealt[..WORDS_PER_TEAM].to_vec());
    room.words
        .insert(Team::White, dealt[WORDS_PER_TEAM..].to_vec());

    room.status = RoomStatus::Playing;
    room.log(format!(
        "Game started! Difficulty: {}. Teams were drawn at random.",
        room.difficulty
    ));
    assert_room_invariants(room);
    Ok(())
}

/// Draw this round's code if the active encoder has none yet
///
/// Returns true when a code was drawn. Never redraws an existing code.
pub fn ensure_code_drawn<R: Randomness + ?Sized>(room: &mut Room, rng: &mut R) -> bool {
    if room.status != RoomStatus::Playing || room.phase != Phase::Encoding || room.has_code() {
        return false;
    }

    let picks = checked_sample(rng.sample(CODE_DIGITS, CODE_LENGTH), CODE_DIGITS, CODE_LENGTH);
    room.current_code = picks.iter().map(|i| (*i + 1) as u8).collect();
    assert_room_invariants(room);
    true
}

/// Broadcast the active encoder's three clues
pub fn submit_clues<R: Randomness + ?Sized>(
    room: &mut Room,
    player: &str,
    clues: [&str; CODE_LENGTH],
    rng: &mut R,
) -> Result<()> {
    ActionRules::check(room, player, GameAction::SubmitClues)?;

    let clues: Vec<String> = clues.iter().map(|c| c.trim().to_string()).collect();
    if let Some(blank) = clues.iter().position(String::is_empty) {
        return Err(Error::InvalidClue(format!("clue {} is blank", blank + 1)));
    }

    ensure_code_drawn(room, rng);
    room.log(format!("{player} gave clues: {}", clues.join(", ")));
    room.clues = clues;
    room.phase = Phase::ClueGiven;
    assert_room_invariants(room);
    Ok(())
}

/// Resolve the opposing team's interception attempt
///
/// Only an exact match scores; a wrong guess and a skip are equivalent.
pub fn resolve_intercept(
    room: &mut Room,
    player: &str,
    choice: &InterceptChoice,
) -> Result<InterceptOutcome> {
    ActionRules::check(room, player, GameAction::Intercept)?;

    let outcome = match choice {
        InterceptChoice::Guess(text) => {
            if text.trim().is_empty() {
                return Err(Error::InvalidGuess);
            }
            let guess = digits_of(text);
            if matches_code(&guess, &room.current_code) {
                InterceptOutcome::Intercepted
            } else {
                InterceptOutcome::Missed { guess }
            }
        }
        InterceptChoice::Skip => InterceptOutcome::Skipped,
    };

    let interceptors = room.turn.opponent();
    match &outcome {
        InterceptOutcome::Intercepted => {
            room.score_mut(interceptors).intercepts += 1;
            room.log(format!("{player} ({interceptors}) intercepted the code!"));
        }
        InterceptOutcome::Missed { .. } => {
            room.log(format!("{player} ({interceptors}) failed to intercept."));
        }
        InterceptOutcome::Skipped => {
            room.log(format!("{player} ({interceptors}) skipped the interception."));
        }
    }

    room.phase = Phase::Guess;
    assert_room_invariants(room);
    Ok(outcome)
}

/// Resolve the active decoder's guess and close the round
pub fn resolve_guess(room: &mut Room, player: &str, text: &str) -> Result<GuessOutcome> {
    ActionRules::check(room, player, GameAction::Guess)?;
    if text.trim().is_empty() {
        return Err(Error::InvalidGuess);
    }

    let code = room.current_code.clone();
    let correct = matches_code(&digits_of(text), &code);
    let active = room.turn;

    if correct {
        room.log(format!("{player} cracked the code."));
    } else {
        room.score_mut(active).fails += 1;
        room.log(format!(
            "{player} guessed wrong (the code was {}).",
            format_code(&code)
        ));
    }

    let end = match check_winner(room) {
        Some(winner) => {
            room.status = RoomStatus::GameOver;
            room.winner = Some(winner);
            room.log(format!("Game over! {winner} wins."));
            RoundEnd::GameOver { winner }
        }
        None => {
            room.turn = active.opponent();
            room.phase = Phase::Encoding;
            room.current_code.clear();
            room.clues.clear();
            rotate_roles(room);
            RoundEnd::NextTurn(room.turn)
        }
    };

    assert_room_invariants(room);
    Ok(GuessOutcome { correct, code, end })
}

/// Swap encoder and decoder for every player
pub fn rotate_roles(room: &mut Room) {
    for role in room.roles.values_mut() {
        *role = role.swapped();
    }
}

/// The winning team, if any counter has reached the threshold
///
/// Checked in a fixed order: intercepts win for the team that made them,
/// fails hand the win to the other team.
pub fn check_winner(room: &Room) -> Option<Team> {
    let black = room.score_of(Team::Black);
    let white = room.score_of(Team::White);

    if black.intercepts >= WIN_THRESHOLD {
        Some(Team::Black)
    } else if white.intercepts >= WIN_THRESHOLD {
        Some(Team::White)
    } else if black.fails >= WIN_THRESHOLD {
        Some(Team::White)
    } else if white.fails >= WIN_THRESHOLD {
        Some(Team::Black)
    } else {
        None
    }
}

/// Use a scripted permutation only if it really is one
fn checked_permutation(order: Vec<usize>, len: usize) -> Vec<usize> {
    let mut sorted = order.clone();
    sorted.sort_unstable();
    if sorted.into_iter().eq(0..len) {
        order
    } else {
        tracing::warn!(?order, len, "Randomness returned an invalid permutation");
        (0..len).collect()
    }
}

/// Use a sample only if it has `amount` distinct in-range indices
fn checked_sample(picks: Vec<usize>, len: usize, amount: usize) -> Vec<usize> {
    let mut sorted = picks.clone();
    sorted.sort_unstable();
    sorted.dedup();
    if picks.len() == amount && sorted.len() == amount && sorted.iter().all(|i| *i < len) {
        picks
    } else {
        tracing::warn!(?picks, len, amount, "Randomness returned an invalid sample");
        (0..amount).collect()
    }
}
