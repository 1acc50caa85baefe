use crate::game::{Algorithm, GameState};

use super::minimax::MinimaxAgent;
use super::negascout::NegascoutAgent;

/// Universal interface for the computer players.
pub trait Agent: Send {
    /// Select a column for the player to move, or `None` when the game is
    /// over or no column can take a piece.
    fn select_column(&mut self, state: &GameState) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

/// Outcome of a root search: the chosen column and its score from the
/// searching player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub column: usize,
    pub score: i32,
}

/// Build the agent for `algorithm` searching `depth` plies.
pub fn build_agent(algorithm: Algorithm, depth: usize) -> Box<dyn Agent> {
    match algorithm {
        Algorithm::Minimax => Box::new(MinimaxAgent::new(depth)),
        Algorithm::Negascout => Box::new(NegascoutAgent::new(depth)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_requested_algorithm() {
        assert_eq!(build_agent(Algorithm::Minimax, 4).name(), "Minimax");
        assert_eq!(build_agent(Algorithm::Negascout, 4).name(), "Negascout");
    }

    #[test]
    fn finished_game_has_no_column() {
        let mut state = GameState::initial();
        for col in [0, 1, 0, 1, 0, 1, 0] {
            state.apply_move_mut(col).unwrap();
        }
        for algorithm in Algorithm::ALL {
            let mut agent = build_agent(algorithm, 3);
            assert_eq!(agent.select_column(&state), None);
        }
    }
}
