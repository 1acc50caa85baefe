use crate::ai::build_agent;
use crate::config::SearchConfig;
use crate::error::ServiceError;
use crate::game::{Algorithm, Difficulty, GameMode, GameState, COLS};
use crate::protocol::{
    BestMoveRequest, BestMoveResponse, CreateGameRequest, DeleteAllResponse, GameSnapshot,
    MoveRecord, MoveRequest,
};

use super::journal::MoveJournal;
use super::store::{lock, GameRecord, GameStore, SharedRecord};

/// Rules enforcement and computer play for every game the service hosts.
#[derive(Debug)]
pub struct GameService {
    store: GameStore,
    journal: Option<MoveJournal>,
    search: SearchConfig,
}

/// A column from a request, if it names a column that can take a piece.
fn valid_column(state: &GameState, column: Option<i64>) -> Option<usize> {
    let column = usize::try_from(column?).ok()?;
    (column < COLS && state.is_legal(column)).then_some(column)
}

impl GameService {
    pub fn new(search: SearchConfig, journal: Option<MoveJournal>) -> Self {
        GameService {
            store: GameStore::new(),
            journal,
            search,
        }
    }

    /// Start a game, optionally replaying a list of moves loaded from a file.
    pub fn create_game(&self, req: CreateGameRequest) -> Result<GameSnapshot, ServiceError> {
        if req.game_type.has_computer() && req.difficulty.is_none() {
            return Err(ServiceError::MissingDifficulty(req.game_type));
        }

        let algorithm = req.algorithm.unwrap_or_default();
        let mut record = GameRecord::new(
            self.store.allocate_game_id(),
            req.game_type,
            req.difficulty,
            algorithm,
        );

        if req.from_file && !req.initial_moves.is_empty() {
            for &m in &req.initial_moves {
                let column = valid_column(record.state(), Some(m))
                    .ok_or(ServiceError::InvalidInitialMove(m))?;
                self.apply(&mut record, column, true)?;
                if record.state().is_terminal() {
                    break;
                }
            }
            log::info!(
                "game {} loaded with {} moves from file",
                record.id(),
                record.moves().len()
            );
        } else if req.game_type == GameMode::ComputerComputer && !req.from_file {
            self.play_computer(&mut record, algorithm)?;
        }

        let snapshot = record.snapshot();
        self.store.insert(record);
        log::info!("created game {} ({})", snapshot.id, snapshot.game_type);
        Ok(snapshot)
    }

    /// Play a move according to the game's mode.
    ///
    /// The game is locked only while moves are validated and applied. A
    /// computer reply is searched on a copy of the state with the lock
    /// released, and discarded if the game changed in the meantime.
    pub fn make_move(&self, id: u64, req: MoveRequest) -> Result<GameSnapshot, ServiceError> {
        let shared = self.store.get(id).ok_or(ServiceError::NotFound(id))?;

        let (expected, algorithm, difficulty) = {
            let mut record = lock(&shared);

            if record.state().is_terminal() {
                return Err(ServiceError::GameFinished);
            }

            let algorithm = req.algorithm.unwrap_or(record.algorithm());

            let computer_reply = match record.mode() {
                GameMode::ComputerComputer => {
                    if req.is_from_file && req.column.is_some() {
                        let column = valid_column(record.state(), req.column)
                            .ok_or(ServiceError::InvalidFileMove)?;
                        self.apply(&mut record, column, true)?;
                        false
                    } else {
                        !req.is_from_file && !req.skip_computer_move
                    }
                }
                GameMode::HumanComputer => {
                    let column = valid_column(record.state(), req.column)
                        .ok_or(ServiceError::InvalidMove)?;
                    self.apply(&mut record, column, req.is_from_file)?;
                    !record.state().is_terminal() && !req.is_from_file && !req.skip_computer_move
                }
                GameMode::HumanHuman => {
                    let column = valid_column(record.state(), req.column)
                        .ok_or(ServiceError::InvalidMove)?;
                    self.apply(&mut record, column, req.is_from_file)?;
                    false
                }
            };

            if !computer_reply {
                return Ok(record.snapshot());
            }
            let difficulty = record
                .difficulty()
                .ok_or(ServiceError::MissingDifficulty(record.mode()))?;
            (record.state().clone(), algorithm, difficulty)
        };

        let column = self.choose_column(id, &expected, algorithm, difficulty);
        self.commit_computer_move(&shared, &expected, column)
    }

    /// Suggest a column for the player to move without changing the game.
    pub fn best_move(&self, id: u64, req: BestMoveRequest) -> Result<BestMoveResponse, ServiceError> {
        let shared = self.store.get(id).ok_or(ServiceError::NotFound(id))?;
        let record = lock(&shared);

        let algorithm = req.algorithm.unwrap_or(record.algorithm());
        let difficulty = req
            .difficulty
            .or(record.difficulty())
            .unwrap_or(Difficulty::Medium);

        let mut agent = build_agent(algorithm, self.search.depth(difficulty));
        let best_move = agent.select_column(record.state());
        log::debug!(
            "game {}: {} at {} suggests {:?}",
            id,
            algorithm,
            difficulty,
            best_move
        );
        Ok(BestMoveResponse { best_move })
    }

    pub fn get_game(&self, id: u64) -> Result<GameSnapshot, ServiceError> {
        let shared = self.store.get(id).ok_or(ServiceError::NotFound(id))?;
        let record = lock(&shared);
        Ok(record.snapshot())
    }

    pub fn list_games(&self) -> Vec<GameSnapshot> {
        self.store
            .all()
            .iter()
            .map(|shared| lock(shared).snapshot())
            .collect()
    }

    pub fn list_moves(&self, id: u64) -> Result<Vec<MoveRecord>, ServiceError> {
        let shared = self.store.get(id).ok_or(ServiceError::NotFound(id))?;
        let record = lock(&shared);
        Ok(record.moves().to_vec())
    }

    pub fn delete_game(&self, id: u64) -> Result<(), ServiceError> {
        if self.store.remove(id) {
            log::info!("deleted game {id}");
            Ok(())
        } else {
            Err(ServiceError::NotFound(id))
        }
    }

    pub fn delete_all(&self) -> DeleteAllResponse {
        let deleted = self.store.clear();
        log::info!("deleted {deleted} games");
        DeleteAllResponse {
            message: format!("Deleted {deleted} games."),
            deleted,
        }
    }

    /// Let the computer play one move on a record nobody else can see yet.
    fn play_computer(&self, record: &mut GameRecord, algorithm: Algorithm) -> Result<(), ServiceError> {
        let difficulty = record
            .difficulty()
            .ok_or(ServiceError::MissingDifficulty(record.mode()))?;
        match self.choose_column(record.id(), record.state(), algorithm, difficulty) {
            Some(column) => self.apply(record, column, false),
            None => Ok(()),
        }
    }

    fn choose_column(
        &self,
        id: u64,
        state: &GameState,
        algorithm: Algorithm,
        difficulty: Difficulty,
    ) -> Option<usize> {
        let depth = self.search.depth(difficulty);
        let mut agent = build_agent(algorithm, depth);
        let column = agent.select_column(state);
        log::debug!(
            "game {}: {} depth {} plays column {:?}",
            id,
            agent.name(),
            depth,
            column
        );
        column
    }

    /// Apply a searched move, provided the game still looks as it did when
    /// the search started.
    fn commit_computer_move(
        &self,
        shared: &SharedRecord,
        expected: &GameState,
        column: Option<usize>,
    ) -> Result<GameSnapshot, ServiceError> {
        let mut record = lock(shared);
        if record.state() != expected {
            log::warn!("game {} changed during search, dropping computer move", record.id());
            return Err(ServiceError::Conflict);
        }
        if let Some(column) = column {
            self.apply(&mut record, column, false)?;
        }
        Ok(record.snapshot())
    }

    /// Apply a validated move and journal it unless it came from a file.
    fn apply(&self, record: &mut GameRecord, column: usize, from_file: bool) -> Result<(), ServiceError> {
        let player = record
            .apply(column, self.store.allocate_move_id())
            .map_err(|_| ServiceError::InvalidMove)?;

        if let Some(outcome) = record.state().outcome() {
            log::info!("game {} finished: {:?}", record.id(), outcome);
        }

        if !from_file {
            if let Some(journal) = &self.journal {
                if let Err(err) = journal.record(record.id(), player, column) {
                    log::warn!(
                        "failed to write move to {}: {}",
                        journal.path().display(),
                        err
                    );
                }
            }
        }

        Ok(())
    }
}

impl Default for GameService {
    fn default() -> Self {
        Self::new(SearchConfig::default(), None)
    }
}
