use std::time::{Duration, Instant};

use crate::error::ClientError;
use crate::game::{Algorithm, Board, Cell, Difficulty, GameMode, Player, Position, COLS};
use crate::protocol::{BestMoveRequest, GameSnapshot, MoveRequest};

use super::api::GameApi;
use super::settings::GameSettings;

/// What the client knows about the game on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientGameState {
    pub id: Option<u64>,
    pub board: Board,
    pub current_player: Player,
    pub is_finished: bool,
    pub winner: Option<Player>,
    pub game_type: Option<GameMode>,
    pub difficulty: Option<Difficulty>,
    pub algorithm: Option<Algorithm>,
    pub winning_cells: Vec<Position>,
    pub last_move_time: Option<Instant>,
    pub move_calculation_time: Duration,
    pub from_file: bool,
}

impl Default for ClientGameState {
    fn default() -> Self {
        ClientGameState {
            id: None,
            board: Board::new(),
            current_player: Player::One,
            is_finished: false,
            winner: None,
            game_type: None,
            difficulty: None,
            algorithm: None,
            winning_cells: Vec::new(),
            last_move_time: None,
            move_calculation_time: Duration::ZERO,
            from_file: false,
        }
    }
}

impl ClientGameState {
    /// Overwrite the server-owned fields with a fresh snapshot.
    pub fn merge(&mut self, snapshot: GameSnapshot) {
        self.id = Some(snapshot.id);
        self.board = snapshot.board_state;
        self.current_player = snapshot.current_player;
        self.is_finished = snapshot.is_finished;
        self.winner = snapshot.winner;
        self.winning_cells = snapshot.winning_cells;
        self.game_type = Some(snapshot.game_type);
        if snapshot.difficulty.is_some() {
            self.difficulty = snapshot.difficulty;
        }
        if snapshot.game_type.has_computer() {
            self.algorithm = Some(snapshot.algorithm);
        }
    }

    pub fn is_winning_cell(&self, row: usize, col: usize) -> bool {
        self.winning_cells.contains(&(row, col))
    }

    /// A column accepts a piece when its top cell is empty.
    pub fn column_open(&self, col: usize) -> bool {
        col < COLS && self.board.get(0, col) == Cell::Empty
    }

    /// Whether the player to move is played by the computer.
    pub fn computer_to_move(&self) -> bool {
        self.game_type
            .is_some_and(|mode| mode.is_computer(self.current_player))
    }
}

/// Drives one game against a [`GameApi`], one request at a time.
pub struct Session<A: GameApi> {
    api: A,
    state: ClientGameState,
    setup_open: bool,
    computer_delay: Duration,
    next_computer_move: Option<Instant>,
    last_error: Option<String>,
}

impl<A: GameApi> Session<A> {
    pub fn new(api: A, computer_delay: Duration) -> Self {
        Session {
            api,
            state: ClientGameState::default(),
            setup_open: true,
            computer_delay,
            next_computer_move: None,
            last_error: None,
        }
    }

    pub fn state(&self) -> &ClientGameState {
        &self.state
    }

    pub fn is_setup_open(&self) -> bool {
        self.setup_open
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// When the next automatic computer move is due, if one is scheduled.
    pub fn next_computer_move(&self) -> Option<Instant> {
        self.next_computer_move
    }

    pub fn start_new_game(&mut self, settings: &GameSettings) -> bool {
        let req = settings.to_request();
        log::info!(
            "starting {} game ({} initial moves)",
            settings.game_type,
            req.initial_moves.len()
        );

        let snapshot = match self.api.create_game(&req) {
            Ok(snapshot) => snapshot,
            Err(err) => return self.fail("create game", err),
        };

        let mut state = ClientGameState {
            difficulty: settings.effective_difficulty(),
            algorithm: settings.effective_algorithm(),
            from_file: settings.from_file(),
            ..ClientGameState::default()
        };
        state.merge(snapshot);
        state.last_move_time = Some(Instant::now());

        self.state = state;
        self.setup_open = false;
        self.last_error = None;
        self.schedule_computer_move();
        true
    }

    /// Play `column` for the player to move. Returns whether the game changed.
    pub fn make_move(&mut self, column: usize) -> bool {
        let Some(id) = self.state.id else {
            return false;
        };
        if self.state.is_finished || !self.state.column_open(column) {
            log::debug!("ignoring move in column {column}");
            return false;
        }

        let req = MoveRequest {
            column: Some(column as i64),
            algorithm: self.state.algorithm,
            difficulty: self.state.difficulty,
            is_from_file: self.state.from_file,
            skip_computer_move: self.state.from_file,
        };
        self.send_move(id, &req)
    }

    /// Ask the server to play for the side to move.
    pub fn make_computer_move(&mut self) -> bool {
        let Some(id) = self.state.id else {
            return false;
        };
        if self.state.is_finished || self.state.from_file {
            return false;
        }

        let req = MoveRequest {
            column: None,
            algorithm: self.state.algorithm,
            difficulty: self.state.difficulty,
            ..Default::default()
        };
        self.send_move(id, &req)
    }

    /// Play the scheduled computer move once it is due.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.next_computer_move {
            Some(due) if due <= now => {
                self.next_computer_move = None;
                self.make_computer_move()
            }
            _ => false,
        }
    }

    /// Suggested column for the player to move.
    pub fn hint(&mut self) -> Option<usize> {
        let id = self.state.id?;
        if self.state.is_finished {
            return None;
        }
        let req = BestMoveRequest {
            algorithm: self.state.algorithm,
            difficulty: self.state.difficulty,
        };
        match self.api.best_move(id, &req) {
            Ok(response) => response.best_move,
            Err(err) => {
                self.fail("best move", err);
                None
            }
        }
    }

    /// Drop the current game and return to the setup screen.
    pub fn reset(&mut self) {
        self.state = ClientGameState::default();
        self.setup_open = true;
        self.next_computer_move = None;
        self.last_error = None;
    }

    fn send_move(&mut self, id: u64, req: &MoveRequest) -> bool {
        let started = Instant::now();
        match self.api.make_move(id, req) {
            Ok(snapshot) => {
                self.state.merge(snapshot);
                self.state.last_move_time = Some(Instant::now());
                self.state.move_calculation_time = started.elapsed();
                self.last_error = None;
                self.schedule_computer_move();
                true
            }
            Err(err) => {
                self.next_computer_move = None;
                self.fail("make move", err)
            }
        }
    }

    fn schedule_computer_move(&mut self) {
        let auto_play = self.state.game_type == Some(GameMode::ComputerComputer)
            && !self.state.is_finished
            && !self.state.from_file;
        self.next_computer_move = auto_play.then(|| Instant::now() + self.computer_delay);
    }

    fn fail(&mut self, action: &str, err: ClientError) -> bool {
        log::error!("{action} failed: {err}");
        self.last_error = Some(err.to_string());
        false
    }
}
