//! JSON bodies exchanged between the client and the game service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game::{Algorithm, Board, Difficulty, GameMode, Player, Position};

/// Full state of one game as returned by every game endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub id: u64,
    pub board_state: Board,
    pub current_player: Player,
    pub is_finished: bool,
    pub winner: Option<Player>,
    pub winning_cells: Vec<Position>,
    pub game_type: GameMode,
    pub difficulty: Option<Difficulty>,
    pub algorithm: Algorithm,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/algorithms/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGameRequest {
    pub game_type: GameMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<Algorithm>,
    /// Columns to replay before play starts, honored when `from_file` is set.
    #[serde(default)]
    pub initial_moves: Vec<i64>,
    #[serde(default)]
    pub from_file: bool,
}

impl CreateGameRequest {
    pub fn new(game_type: GameMode) -> Self {
        CreateGameRequest {
            game_type,
            difficulty: None,
            algorithm: None,
            initial_moves: Vec::new(),
            from_file: false,
        }
    }
}

/// Body of `POST /api/algorithms/{id}/make_move/`.
///
/// `column` is null when asking the computer to play. `difficulty` is carried
/// for symmetry with the client state; the game's own difficulty is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveRequest {
    #[serde(default)]
    pub column: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<Algorithm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub is_from_file: bool,
    #[serde(default)]
    pub skip_computer_move: bool,
}

/// Body of `POST /api/algorithms/{id}/get_best_move/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BestMoveRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<Algorithm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestMoveResponse {
    pub best_move: Option<usize>,
}

/// One entry of a game's move history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub id: u64,
    pub game: u64,
    pub column: usize,
    pub player: Player,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAllResponse {
    pub message: String,
    pub deleted: usize,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
