//! Client intents against the shared room store
//!
//! Each intent is one load → transition → save cycle. Nothing is cached
//! between calls: every operation loads the store immediately before it
//! mutates, because other clients may have written in the meantime. Two
//! intents racing inside the same window are resolved last-writer-wins;
//! lost updates are neither detected nor reported.
//!
//! Clients observe changes by polling [`RoomService::view`] at the
//! configured interval (see [`crate::config::GameConfig::poll_interval`]).

use tracing::{debug, info, instrument};

use crate::config::GameConfig;
use crate::error::{Error, Result};
use crate::game::{
    self, GuessOutcome, InterceptChoice, InterceptOutcome, JoinOutcome, RoundEnd,
};
use crate::models::{Room, CODE_LENGTH};
use crate::permissions::{ActionRules, GameAction};
use crate::rng::{Randomness, SystemRandomness};
use crate::storage::RoomStore;
use crate::view::RoomView;
use crate::words::{StaticWordSupply, WordSupply};

/// An intent's typed result together with the room as saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied<T> {
    pub room: Room,
    pub outcome: T,
}

/// Service wired from a [`GameConfig`]
pub type ConfiguredService = RoomService<Box<dyn RoomStore>, StaticWordSupply, SystemRandomness>;

pub struct RoomService<S, W, R> {
    store: S,
    words: W,
    rng: R,
}

impl ConfiguredService {
    pub fn from_config(config: &GameConfig) -> Result<Self> {
        Ok(RoomService::new(
            config.open_store()?,
            config.word_supply(),
            SystemRandomness::new(),
        ))
    }
}

impl<S, W, R> RoomService<S, W, R>
where
    S: RoomStore,
    W: WordSupply,
    R: Randomness,
{
    pub fn new(store: S, words: W, rng: R) -> Self {
        Self { store, words, rng }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Open a new room in the waiting lobby
    #[instrument(skip(self))]
    pub fn create_room(&mut self, room_id: &str, player: &str, difficulty: &str) -> Result<Room> {
        let mut rooms = self.store.load_all();
        if rooms.contains_key(room_id) {
            return Err(Error::RoomExists(room_id.to_string()));
        }

        let room = Room::new(player, difficulty);
        rooms.insert(room_id.to_string(), room.clone());
        self.store.save_all(&rooms)?;

        info!(room_id, player, difficulty, "Room created");
        Ok(room)
    }

    /// Take a seat, or reconnect to one already held
    #[instrument(skip(self))]
    pub fn join_room(&mut self, room_id: &str, player: &str) -> Result<Applied<JoinOutcome>> {
        let mut rooms = self.store.load_all();
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| Error::RoomNotFound(room_id.to_string()))?;

        let outcome = game::join_room(room_id, room, player)?;
        let room = room.clone();

        match outcome {
            JoinOutcome::Joined => {
                self.store.save_all(&rooms)?;
                info!(room_id, player, seats = room.players.len(), "Player joined");
            }
            JoinOutcome::Rejoined => debug!(room_id, player, "Player reconnected"),
        }

        Ok(Applied { room, outcome })
    }

    /// Deal teams, roles and words once four players are seated
    #[instrument(skip(self))]
    pub fn start_game(&mut self, room_id: &str) -> Result<Room> {
        let words = &self.words;
        let rng = &mut self.rng;
        let (room, ()) = self
            .store
            .update(room_id, |room| game::start_game(room_id, room, words, rng))?;

        info!(room_id, players = ?room.players, "Game started");
        Ok(room)
    }

    /// The current code for the active encoder, drawing it on first request
    #[instrument(skip(self))]
    pub fn reveal_code(&mut self, room_id: &str, player: &str) -> Result<Vec<u8>> {
        let mut rooms = self.store.load_all();
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| Error::RoomNotFound(room_id.to_string()))?;
        ActionRules::check(room, player, GameAction::DrawCode)?;

        if game::ensure_code_drawn(room, &mut self.rng) {
            let code = room.current_code.clone();
            self.store.save_all(&rooms)?;
            debug!(room_id, "Code drawn");
            return Ok(code);
        }

        Ok(room.current_code.clone())
    }

    /// Broadcast the active encoder's clues
    #[instrument(skip(self))]
    pub fn submit_clues(
        &mut self,
        room_id: &str,
        player: &str,
        clues: [&str; CODE_LENGTH],
    ) -> Result<Room> {
        let rng = &mut self.rng;
        let (room, ()) = self
            .store
            .update(room_id, |room| game::submit_clues(room, player, clues, rng))?;

        info!(room_id, player, "Clues submitted");
        Ok(room)
    }

    /// Record the opposing team's interception attempt or pass
    #[instrument(skip(self))]
    pub fn resolve_intercept(
        &mut self,
        room_id: &str,
        player: &str,
        choice: InterceptChoice,
    ) -> Result<Applied<InterceptOutcome>> {
        let (room, outcome) = self
            .store
            .update(room_id, |room| game::resolve_intercept(room, player, &choice))?;

        info!(room_id, player, ?outcome, "Interception resolved");
        Ok(Applied { room, outcome })
    }

    /// Resolve the active decoder's guess and close the round
    #[instrument(skip(self))]
    pub fn resolve_guess(
        &mut self,
        room_id: &str,
        player: &str,
        guess: &str,
    ) -> Result<Applied<GuessOutcome>> {
        let (room, outcome) = self
            .store
            .update(room_id, |room| game::resolve_guess(room, player, guess))?;

        match outcome.end {
            RoundEnd::NextTurn(team) => {
                info!(room_id, correct = outcome.correct, next = %team, "Round resolved")
            }
            RoundEnd::GameOver { winner } => info!(room_id, winner = %winner, "Game over"),
        }
        Ok(Applied { room, outcome })
    }

    /// Fresh copy of a room
    pub fn snapshot(&self, room_id: &str) -> Result<Room> {
        self.store
            .get(room_id)
            .ok_or_else(|| Error::RoomNotFound(room_id.to_string()))
    }

    /// Fresh per-player projection of a room
    pub fn view(&self, room_id: &str, player: &str) -> Result<RoomView> {
        let room = self.snapshot(room_id)?;
        Ok(RoomView::for_player(room_id, &room, player))
    }

    /// Remove a room from the store
    #[instrument(skip(self))]
    pub fn delete_room(&mut self, room_id: &str) -> Result<bool> {
        let removed = self.store.remove(room_id)?;
        if removed {
            info!(room_id, "Room deleted");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Phase, Role, RoomStatus, Team, TeamScore};
    use crate::rng::ScriptedRandomness;
    use crate::storage::{JsonFileStore, MemoryRoomStore};

    type TestService<'a> = RoomService<&'a MemoryRoomStore, StaticWordSupply, ScriptedRandomness>;

    fn service(store: &MemoryRoomStore) -> TestService<'_> {
        RoomService::new(store, StaticWordSupply::empty(), ScriptedRandomness::new())
    }

    /// Room "8888" started with seating A, B | C, D
    fn started(store: &MemoryRoomStore) -> TestService<'_> {
        let mut svc = service(store);
        svc.create_room("8888", "A", "easy").unwrap();
        for player in ["B", "C", "D"] {
            svc.join_room("8888", player).unwrap();
        }
        svc.start_game("8888").unwrap();
        svc
    }

    #[test]
    fn test_create_twice_fails() {
        let store = MemoryRoomStore::new();
        let mut svc = service(&store);
        svc.create_room("8888", "A", "easy").unwrap();

        let err = svc.create_room("8888", "B", "hard").unwrap_err();
        assert!(matches!(err, Error::RoomExists(id) if id == "8888"));
        assert_eq!(svc.snapshot("8888").unwrap().players, vec!["A"]);
    }

    #[test]
    fn test_join_missing_room() {
        let store = MemoryRoomStore::new();
        let err = service(&store).join_room("nope", "A").unwrap_err();
        assert!(matches!(err, Error::RoomNotFound(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_rejoin_and_full_room() {
        let store = MemoryRoomStore::new();
        let mut svc = service(&store);
        svc.create_room("8888", "A", "easy").unwrap();
        for player in ["B", "C", "D"] {
            assert_eq!(
                svc.join_room("8888", player).unwrap().outcome,
                JoinOutcome::Joined
            );
        }

        let before = svc.snapshot("8888").unwrap();
        let again = svc.join_room("8888", "B").unwrap();
        assert_eq!(again.outcome, JoinOutcome::Rejoined);
        assert_eq!(again.room, before);

        assert!(matches!(
            svc.join_room("8888", "E"),
            Err(Error::RoomFull(_))
        ));
        assert_eq!(svc.snapshot("8888").unwrap(), before);
    }

    #[test]
    fn test_start_needs_four() {
        let store = MemoryRoomStore::new();
        let mut svc = service(&store);
        svc.create_room("8888", "A", "easy").unwrap();
        svc.join_room("8888", "B").unwrap();

        let err = svc.start_game("8888").unwrap_err();
        assert!(matches!(err, Error::NotEnoughPlayers { count: 2, .. }));
        assert_eq!(svc.snapshot("8888").unwrap().status, RoomStatus::Waiting);
    }

    #[test]
    fn test_reveal_code_is_stable() {
        let store = MemoryRoomStore::new();
        let mut svc = started(&store);

        let code = svc.reveal_code("8888", "A").unwrap();
        assert_eq!(code, vec![1, 2, 3]);
        assert_eq!(svc.reveal_code("8888", "A").unwrap(), code);
        assert_eq!(svc.snapshot("8888").unwrap().current_code, code);

        assert!(matches!(
            svc.reveal_code("8888", "C"),
            Err(Error::IllegalPhaseAction(_))
        ));
    }

    #[test]
    fn test_end_to_end_first_round() {
        let store = MemoryRoomStore::new();
        let mut svc = service(&store);

        svc.create_room("8888", "A", "easy").unwrap();
        for player in ["B", "C", "D"] {
            svc.join_room("8888", player).unwrap();
        }

        let room = svc.start_game("8888").unwrap();
        assert_eq!(room.status, RoomStatus::Playing);
        assert_eq!(room.members_of(Team::Black).len(), 2);
        assert_eq!(room.members_of(Team::White).len(), 2);

        let encoder = room.active_encoder().unwrap().to_string();
        let decoder = room.active_decoder().unwrap().to_string();
        let opponent = room.members_of(Team::White)[0].to_string();

        let room = svc
            .submit_clues("8888", &encoder, ["sun", "bark", "seed"])
            .unwrap();
        assert_eq!(room.phase, Phase::ClueGiven);

        let applied = svc
            .resolve_intercept("8888", &opponent, InterceptChoice::Skip)
            .unwrap();
        assert_eq!(applied.outcome, InterceptOutcome::Skipped);
        assert_eq!(applied.room.phase, Phase::Guess);
        assert_eq!(applied.room.score_of(Team::White), TeamScore::default());

        let code = applied.room.current_code.clone();
        let wrong: String = code.iter().rev().map(u8::to_string).collect();
        let applied = svc.resolve_guess("8888", &decoder, &wrong).unwrap();
        assert!(!applied.outcome.correct);

        let room = svc.snapshot("8888").unwrap();
        assert_eq!(room.score_of(Team::Black).fails, 1);
        assert_eq!(room.phase, Phase::Encoding);
        assert_eq!(room.turn, Team::White);
        assert!(room.current_code.is_empty() && room.clues.is_empty());
        assert_eq!(room.role_of(&encoder), Some(Role::Decoder));
        assert_eq!(room.role_of(&decoder), Some(Role::Encoder));
    }

    #[test]
    fn test_full_game_to_intercept_win() {
        let store = MemoryRoomStore::new();
        let mut svc = started(&store);

        // Round 1: Black encodes, White intercepts 1-2-3
        svc.submit_clues("8888", "A", ["a", "b", "c"]).unwrap();
        svc.resolve_intercept("8888", "C", InterceptChoice::Guess("1-2-3".into()))
            .unwrap();
        let round = svc.resolve_guess("8888", "B", "123").unwrap();
        assert_eq!(round.outcome.end, RoundEnd::NextTurn(Team::White));

        // Round 2: White encodes (D after rotation), Black skips, D's teammate guesses
        svc.submit_clues("8888", "D", ["d", "e", "f"]).unwrap();
        svc.resolve_intercept("8888", "A", InterceptChoice::Skip).unwrap();
        svc.resolve_guess("8888", "C", "123").unwrap();

        // Round 3: Black again with A encoding, White intercepts a second time
        svc.submit_clues("8888", "A", ["g", "h", "i"]).unwrap();
        svc.resolve_intercept("8888", "D", InterceptChoice::Guess("123".into()))
            .unwrap();
        let last = svc.resolve_guess("8888", "B", "123").unwrap();

        assert_eq!(last.outcome.end, RoundEnd::GameOver { winner: Team::White });
        let room = svc.snapshot("8888").unwrap();
        assert_eq!(room.status, RoomStatus::GameOver);
        assert_eq!(room.winner, Some(Team::White));
        assert_eq!(room.score_of(Team::White).intercepts, 2);

        assert!(svc.submit_clues("8888", "C", ["x", "y", "z"]).is_err());
        assert_eq!(svc.snapshot("8888").unwrap(), room);
    }

    #[test]
    fn test_rejected_intent_writes_nothing() {
        let store = MemoryRoomStore::new();
        let mut svc = started(&store);
        let before = svc.snapshot("8888").unwrap();

        assert!(matches!(
            svc.submit_clues("8888", "A", ["a", "", "c"]),
            Err(Error::InvalidClue(_))
        ));
        assert!(matches!(
            svc.resolve_guess("8888", "B", "123"),
            Err(Error::IllegalPhaseAction(_))
        ));
        assert_eq!(svc.snapshot("8888").unwrap(), before);
    }

    #[test]
    fn test_clients_always_read_fresh_state() {
        let store = MemoryRoomStore::new();
        let mut host = service(&store);
        let mut guest = service(&store);

        host.create_room("8888", "A", "easy").unwrap();
        guest.join_room("8888", "B").unwrap();

        assert_eq!(host.view("8888", "A").unwrap().players, vec!["A", "B"]);
    }

    #[test]
    fn test_last_writer_wins() {
        let store = MemoryRoomStore::new();
        let mut svc = service(&store);
        svc.create_room("8888", "A", "easy").unwrap();

        // A slow client holding a stale snapshot saves after another join
        let stale = store.load_all();
        svc.join_room("8888", "B").unwrap();
        store.save_all(&stale).unwrap();

        assert_eq!(svc.snapshot("8888").unwrap().players, vec!["A"]);
    }

    #[test]
    fn test_view_and_delete() {
        let store = MemoryRoomStore::new();
        let mut svc = started(&store);

        let view = svc.view("8888", "A").unwrap();
        assert_eq!(view.pending, Some(GameAction::SubmitClues));
        assert_eq!(view.my_team, Some(Team::Black));

        assert!(svc.delete_room("8888").unwrap());
        assert!(matches!(svc.view("8888", "A"), Err(Error::RoomNotFound(_))));
        assert!(!svc.delete_room("8888").unwrap());
    }

    #[test]
    fn test_json_store_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rooms.json");

        let mut svc = RoomService::new(
            JsonFileStore::new(&path),
            StaticWordSupply::empty(),
            ScriptedRandomness::new(),
        );
        svc.create_room("8888", "A", "easy").unwrap();
        for player in ["B", "C", "D"] {
            svc.join_room("8888", player).unwrap();
        }
        svc.start_game("8888").unwrap();
        svc.submit_clues("8888", "A", ["a", "b", "c"]).unwrap();

        let reopened = RoomService::new(
            JsonFileStore::new(&path),
            StaticWordSupply::empty(),
            SystemRandomness::seeded(1),
        );
        let room = reopened.snapshot("8888").unwrap();
        assert_eq!(room.phase, Phase::ClueGiven);
        assert_eq!(room.clues, vec!["a", "b", "c"]);
    }
}
