//! Core Connect Four game logic: board representation, players, game modes,
//! and the game state machine with win and draw detection.

mod board;
mod mode;
mod player;
mod state;

pub use board::{Board, Cell, Position, COLS, ROWS};
pub use mode::{Algorithm, Difficulty, GameMode};
pub use player::Player;
pub use state::{GameOutcome, GameState};
