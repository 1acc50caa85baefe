use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::error::MoveError;
use crate::game::{Algorithm, Difficulty, GameMode, GameState, Player};
use crate::protocol::{GameSnapshot, MoveRecord};

/// One game with its settings and move history.
#[derive(Debug, Clone)]
pub struct GameRecord {
    id: u64,
    mode: GameMode,
    difficulty: Option<Difficulty>,
    algorithm: Algorithm,
    state: GameState,
    moves: Vec<MoveRecord>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GameRecord {
    pub fn new(
        id: u64,
        mode: GameMode,
        difficulty: Option<Difficulty>,
        algorithm: Algorithm,
    ) -> Self {
        let now = Utc::now();
        GameRecord {
            id,
            mode,
            difficulty,
            algorithm,
            state: GameState::initial(),
            moves: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    /// Play `column` for the player to move and record it under `move_id`.
    /// Returns the player who moved.
    pub fn apply(&mut self, column: usize, move_id: u64) -> Result<Player, MoveError> {
        let player = self.state.current_player();
        self.state.apply_move_mut(column)?;

        let now = Utc::now();
        self.moves.push(MoveRecord {
            id: move_id,
            game: self.id,
            column,
            player,
            created_at: now,
        });
        self.updated_at = now;
        Ok(player)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            id: self.id,
            board_state: *self.state.board(),
            current_player: self.state.current_player(),
            is_finished: self.state.is_terminal(),
            winner: self.state.winner(),
            winning_cells: self.state.winning_cells().to_vec(),
            game_type: self.mode,
            difficulty: self.difficulty,
            algorithm: self.algorithm,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

pub type SharedRecord = Arc<Mutex<GameRecord>>;

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory game registry. The map lock is only held for lookups and
/// inserts; each game carries its own lock.
#[derive(Debug)]
pub struct GameStore {
    games: Mutex<BTreeMap<u64, SharedRecord>>,
    next_game_id: AtomicU64,
    next_move_id: AtomicU64,
}

impl GameStore {
    pub fn new() -> Self {
        GameStore {
            games: Mutex::new(BTreeMap::new()),
            next_game_id: AtomicU64::new(1),
            next_move_id: AtomicU64::new(1),
        }
    }

    pub fn allocate_game_id(&self) -> u64 {
        self.next_game_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn allocate_move_id(&self) -> u64 {
        self.next_move_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn insert(&self, record: GameRecord) -> SharedRecord {
        let id = record.id();
        let shared = Arc::new(Mutex::new(record));
        lock(&self.games).insert(id, Arc::clone(&shared));
        shared
    }

    pub fn get(&self, id: u64) -> Option<SharedRecord> {
        lock(&self.games).get(&id).cloned()
    }

    /// All games in id order.
    pub fn all(&self) -> Vec<SharedRecord> {
        lock(&self.games).values().cloned().collect()
    }

    pub fn remove(&self, id: u64) -> bool {
        lock(&self.games).remove(&id).is_some()
    }

    /// Remove every game, returning how many there were.
    pub fn clear(&self) -> usize {
        let mut games = lock(&self.games);
        let count = games.len();
        games.clear();
        count
    }

    pub fn len(&self) -> usize {
        lock(&self.games).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}
