//! Client side: the API the terminal talks through and the session state it
//! renders.

mod api;
mod session;
mod settings;

pub use api::{GameApi, HttpGameApi, LocalGameApi};
pub use session::{ClientGameState, Session};
pub use settings::{load_move_list, parse_move_list, GameSettings};
