//! Computer players: the [`Agent`] trait, the window heuristic, and the
//! minimax and negascout tree searches.

mod agent;
mod heuristic;
mod minimax;
mod negascout;
mod search;

pub use agent::{build_agent, Agent, SearchResult};
pub use heuristic::{Heuristic, WindowHeuristic};
pub use minimax::MinimaxAgent;
pub use negascout::NegascoutAgent;
