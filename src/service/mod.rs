//! Game service: rules enforcement, game records, the move journal, computer
//! play, and the HTTP routes exposing them.

mod game_service;
pub mod http;
mod journal;
mod store;

pub use game_service::GameService;
pub use http::router;
pub use journal::MoveJournal;
pub use store::{GameRecord, GameStore};
