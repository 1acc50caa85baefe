//! # Connect Four
//!
//! A Connect Four game service with minimax and negascout opponents, served
//! over HTTP, plus a terminal client built with Ratatui.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, player, state machine, game modes
//! - [`ai`]: Agent trait, board heuristic, minimax and negascout search
//! - [`service`]: Game records, move journal, rules per mode, HTTP routes
//! - [`protocol`]: JSON bodies shared by the service and the client
//! - [`client`]: HTTP and in-process APIs, session controller
//! - [`ui`]: Terminal UI: setup form and board view
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod client;
pub mod config;
pub mod error;
pub mod game;
pub mod protocol;
pub mod service;
pub mod ui;
