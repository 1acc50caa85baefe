use std::path::PathBuf;

/// Errors raised when a move cannot be played.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is out of range")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("game is already over")]
    GameOver,
}

/// Errors produced by the game service. Each maps to an HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Game {0} not found")]
    NotFound(u64),

    #[error("Game is already finished")]
    GameFinished,

    #[error("Invalid move")]
    InvalidMove,

    #[error("Invalid move from file")]
    InvalidFileMove,

    #[error("Invalid move {0} in initial moves")]
    InvalidInitialMove(i64),

    #[error("difficulty is required for {0} games")]
    MissingDifficulty(crate::game::GameMode),

    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error("Game changed while the computer was thinking")]
    Conflict,

    #[error("search task failed: {0}")]
    Internal(String),
}

/// Errors seen by the client at the network boundary.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server rejected request ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("service error: {0}")]
    Service(#[from] ServiceError),
}

/// Errors raised while reading a move list file.
#[derive(Debug, thiserror::Error)]
pub enum MoveListError {
    #[error("failed to read move list {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid column '{token}' at position {position} (expected 0-6)")]
    InvalidToken { token: String, position: usize },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameMode;

    #[test]
    fn test_move_error_display() {
        assert_eq!(MoveError::ColumnFull(3).to_string(), "column 3 is full");
        assert_eq!(
            MoveError::InvalidColumn(9).to_string(),
            "column 9 is out of range"
        );
    }

    #[test]
    fn test_service_error_display() {
        assert_eq!(
            ServiceError::InvalidInitialMove(8).to_string(),
            "Invalid move 8 in initial moves"
        );
        assert_eq!(
            ServiceError::MissingDifficulty(GameMode::HumanComputer).to_string(),
            "difficulty is required for human-computer games"
        );
        assert_eq!(
            ServiceError::Conflict.to_string(),
            "Game changed while the computer was thinking"
        );
    }

    #[test]
    fn test_client_error_display() {
        let err = ClientError::Api {
            status: 400,
            message: "Invalid move".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "server rejected request (400): Invalid move"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("client.base_url must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: client.base_url must not be empty"
        );
    }
}
