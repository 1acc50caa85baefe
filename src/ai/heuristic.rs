use crate::game::{Board, Cell, Player, COLS, ROWS};

/// Trait for evaluating a board position from a player's perspective.
pub trait Heuristic: Send + Sync {
    fn evaluate(&self, board: &Board, player: Player) -> i32;
}

const CENTER_COL: usize = 3;

/// Scores every 4-cell window on the board plus a bonus for center pieces.
///
/// Own threats and opponent threats are weighted differently, so the score
/// for one player is not the negation of the score for the other.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowHeuristic;

impl WindowHeuristic {
    fn score_window(window: [Cell; 4], own_cell: Cell, opp_cell: Cell) -> i32 {
        let own = window.iter().filter(|&&c| c == own_cell).count();
        let opp = window.iter().filter(|&&c| c == opp_cell).count();
        let empty = 4 - own - opp;
        let mut score = 0;

        if own == 4 {
            score += 100;
        }
        if own == 3 && empty == 1 {
            // An open end can still be extended
            if window[0] == Cell::Empty || window[3] == Cell::Empty {
                score += 12;
            } else {
                score += 10;
            }
        } else if own == 2 && empty == 2 {
            score += 4;
        }

        if opp == 4 {
            score -= 100;
        } else if opp == 3 && empty == 1 {
            score -= 15;
        } else if opp == 2 && empty == 2 {
            score -= 5;
        }

        score
    }
}

impl Heuristic for WindowHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> i32 {
        let own_cell = player.to_cell();
        let opp_cell = player.other().to_cell();

        let center = (0..ROWS)
            .filter(|&row| board.get(row, CENTER_COL) == own_cell)
            .count() as i32;
        let mut score = center * 5;

        for_each_window(board, |window| {
            score += Self::score_window(window, own_cell, opp_cell);
        });

        score
    }
}

/// Visit every horizontal, vertical and diagonal run of four cells.
fn for_each_window(board: &Board, mut visit: impl FnMut([Cell; 4])) {
    // Horizontal
    for row in 0..ROWS {
        for col in 0..COLS - 3 {
            visit(std::array::from_fn(|i| board.get(row, col + i)));
        }
    }

    // Vertical
    for row in 0..ROWS - 3 {
        for col in 0..COLS {
            visit(std::array::from_fn(|i| board.get(row + i, col)));
        }
    }

    for row in 0..ROWS - 3 {
        for col in 0..COLS - 3 {
            // Top-left to bottom-right
            visit(std::array::from_fn(|i| board.get(row + i, col + i)));
            // Bottom-left to top-right
            visit(std::array::from_fn(|i| board.get(ROWS - 1 - row - i, col + i)));
        }
    }
}
