//! Terminal UI: a setup form for choosing the game, and the board view for
//! playing it.

mod app;
mod game_view;
mod setup_view;

pub use app::App;
pub use game_view::status_line;
pub use setup_view::SetupForm;
