use crate::game::{Board, GameState, Player};

use super::agent::{Agent, SearchResult};
use super::heuristic::{Heuristic, WindowHeuristic};
use super::search::{best_root_move, ordered_moves, play, Status, INFINITY, WIN_SCORE};

/// Minimax agent with alpha-beta pruning.
///
/// Every position is scored from the point of view of the player who started
/// the search: that player maximizes, the opponent minimizes.
pub struct MinimaxAgent {
    depth: usize,
    heuristic: Box<dyn Heuristic>,
}

impl MinimaxAgent {
    pub fn new(depth: usize) -> Self {
        MinimaxAgent {
            depth,
            heuristic: Box::new(WindowHeuristic),
        }
    }

    pub fn with_heuristic(depth: usize, heuristic: Box<dyn Heuristic>) -> Self {
        MinimaxAgent { depth, heuristic }
    }

    /// Search the position for `player` and return the best root move.
    pub fn search(&self, board: &Board, player: Player) -> Option<SearchResult> {
        let depth = self.depth.saturating_sub(1);
        best_root_move(board, player, |child, status| {
            self.minimax(child, status, depth, -INFINITY, INFINITY, player.other(), player)
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &self,
        board: &Board,
        status: Status,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        to_move: Player,
        root: Player,
    ) -> i32 {
        match status {
            // The player who just moved is the one not to move
            Status::Won if to_move.other() == root => return WIN_SCORE + depth as i32,
            Status::Won => return -(WIN_SCORE + depth as i32),
            Status::Draw => return 0,
            Status::Open => {}
        }

        if depth == 0 {
            return self.heuristic.evaluate(board, root);
        }

        let maximizing = to_move == root;
        let mut best = if maximizing { -INFINITY } else { INFINITY };

        for col in ordered_moves(board) {
            let Some((child, child_status)) = play(board, col, to_move) else {
                continue;
            };
            let score = self.minimax(
                &child,
                child_status,
                depth - 1,
                alpha,
                beta,
                to_move.other(),
                root,
            );
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }

        best
    }
}

impl Agent for MinimaxAgent {
    fn select_column(&mut self, state: &GameState) -> Option<usize> {
        if state.is_terminal() {
            return None;
        }
        self.search(state.board(), state.current_player())
            .map(|result| result.column)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
