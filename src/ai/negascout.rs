use crate::game::{Board, GameState, Player};

use super::agent::{Agent, SearchResult};
use super::heuristic::{Heuristic, WindowHeuristic};
use super::search::{best_root_move, ordered_moves, play, Status, INFINITY, WIN_SCORE};

/// Negascout (principal variation search) agent.
///
/// The first child of each node is searched with the full window and the
/// rest with a null window, re-searching only when a move turns out better
/// than the current best. Scores are relative to the side to move; leaves use
/// the searching player's evaluation, negated on the opponent's turns, so the
/// root scores match [`super::MinimaxAgent`] exactly.
pub struct NegascoutAgent {
    depth: usize,
    heuristic: Box<dyn Heuristic>,
}

impl NegascoutAgent {
    pub fn new(depth: usize) -> Self {
        NegascoutAgent {
            depth,
            heuristic: Box::new(WindowHeuristic),
        }
    }

    pub fn with_heuristic(depth: usize, heuristic: Box<dyn Heuristic>) -> Self {
        NegascoutAgent { depth, heuristic }
    }

    /// Search the position for `player` and return the best root move.
    pub fn search(&self, board: &Board, player: Player) -> Option<SearchResult> {
        let depth = self.depth.saturating_sub(1);
        best_root_move(board, player, |child, status| {
            -self.negascout(child, status, depth, -INFINITY, INFINITY, player.other(), player)
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn negascout(
        &self,
        board: &Board,
        status: Status,
        depth: usize,
        mut alpha: i32,
        beta: i32,
        to_move: Player,
        root: Player,
    ) -> i32 {
        match status {
            // The previous mover won, a loss for the side to move
            Status::Won => return -(WIN_SCORE + depth as i32),
            Status::Draw => return 0,
            Status::Open => {}
        }

        if depth == 0 {
            let score = self.heuristic.evaluate(board, root);
            return if to_move == root { score } else { -score };
        }

        let mut best = -INFINITY;

        for (i, col) in ordered_moves(board).enumerate() {
            let Some((child, child_status)) = play(board, col, to_move) else {
                continue;
            };
            let next = to_move.other();

            let score = if i == 0 {
                -self.negascout(&child, child_status, depth - 1, -beta, -alpha, next, root)
            } else {
                let probe =
                    -self.negascout(&child, child_status, depth - 1, -alpha - 1, -alpha, next, root);
                if alpha < probe && probe < beta {
                    -self.negascout(&child, child_status, depth - 1, -beta, -probe, next, root)
                } else {
                    probe
                }
            };

            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        best
    }
}

impl Agent for NegascoutAgent {
    fn select_column(&mut self, state: &GameState) -> Option<usize> {
        if state.is_terminal() {
            return None;
        }
        self.search(state.board(), state.current_player())
            .map(|result| result.column)
    }

    fn name(&self) -> &str {
        "Negascout"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MinimaxAgent;

    fn state_from(moves: &[usize]) -> GameState {
        let mut state = GameState::initial();
        for &col in moves {
            state.apply_move_mut(col).unwrap();
        }
        state
    }

    #[test]
    fn takes_winning_move() {
        let state = state_from(&[0, 0, 1, 1, 2, 2]);
        for depth in [1, 4, 7] {
            let mut agent = NegascoutAgent::new(depth);
            assert_eq!(agent.select_column(&state), Some(3), "depth {depth}");
        }
    }

    #[test]
    fn blocks_opponent_win() {
        let state = state_from(&[6, 0, 6, 1, 5, 2]);
        let mut agent = NegascoutAgent::new(4);
        assert_eq!(agent.select_column(&state), Some(3));
    }

    #[test]
    fn matches_minimax_scores() {
        let positions: [&[usize]; 5] = [
            &[],
            &[3],
            &[3, 3, 2, 4],
            &[0, 6, 1, 5, 3, 3, 4],
            &[3, 2, 3, 2, 4, 4, 1, 5, 2, 3],
        ];

        for moves in positions {
            let state = state_from(moves);
            for depth in 1..=5 {
                let minimax = MinimaxAgent::new(depth)
                    .search(state.board(), state.current_player());
                let negascout = NegascoutAgent::new(depth)
                    .search(state.board(), state.current_player());
                assert_eq!(minimax, negascout, "moves {moves:?} depth {depth}");
            }
        }
    }

    #[test]
    fn full_game_vs_minimax_completes() {
        let mut one = NegascoutAgent::new(4);
        let mut two = MinimaxAgent::new(3);
        let mut state = GameState::initial();

        while !state.is_terminal() {
            let col = match state.current_player() {
                Player::One => one.select_column(&state),
                Player::Two => two.select_column(&state),
            }
            .expect("unfinished game has a legal column");
            state.apply_move_mut(col).unwrap();
        }

        assert!(state.outcome().is_some());
        assert!(state.board().piece_count() <= 42);
    }

    #[test]
    fn name_is_negascout() {
        let agent = NegascoutAgent::new(7);
        assert_eq!(agent.name(), "Negascout");
    }
}
