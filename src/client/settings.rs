use std::path::Path;

use crate::error::MoveListError;
use crate::game::{Algorithm, Difficulty, GameMode, COLS};
use crate::protocol::CreateGameRequest;

/// Choices made on the setup screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSettings {
    pub game_type: GameMode,
    pub difficulty: Difficulty,
    pub algorithm: Algorithm,
    /// Moves loaded from a file, replayed by the server when the game is created.
    pub initial_moves: Vec<usize>,
}

impl GameSettings {
    pub fn new(game_type: GameMode) -> Self {
        GameSettings {
            game_type,
            difficulty: Difficulty::default(),
            algorithm: Algorithm::default(),
            initial_moves: Vec::new(),
        }
    }

    pub fn from_file(&self) -> bool {
        !self.initial_moves.is_empty()
    }

    /// Difficulty as sent to the server; human-human games have none.
    pub fn effective_difficulty(&self) -> Option<Difficulty> {
        self.game_type.has_computer().then_some(self.difficulty)
    }

    pub fn effective_algorithm(&self) -> Option<Algorithm> {
        self.game_type.has_computer().then_some(self.algorithm)
    }

    pub fn to_request(&self) -> CreateGameRequest {
        CreateGameRequest {
            game_type: self.game_type,
            difficulty: self.effective_difficulty(),
            algorithm: self.effective_algorithm(),
            initial_moves: self.initial_moves.iter().map(|&c| c as i64).collect(),
            from_file: self.from_file(),
        }
    }
}

/// Parse a move list: columns 0-6 separated by whitespace or commas.
/// Everything after `#` on a line is ignored.
pub fn parse_move_list(text: &str) -> Result<Vec<usize>, MoveListError> {
    let mut moves = Vec::new();
    let tokens = text
        .lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .flat_map(|line| line.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|token| !token.is_empty());

    for (position, token) in tokens.enumerate() {
        match token.parse::<usize>() {
            Ok(column) if column < COLS => moves.push(column),
            _ => {
                return Err(MoveListError::InvalidToken {
                    token: token.to_string(),
                    position,
                })
            }
        }
    }
    Ok(moves)
}

pub fn load_move_list(path: &Path) -> Result<Vec<usize>, MoveListError> {
    let text = std::fs::read_to_string(path).map_err(|source| MoveListError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let moves = parse_move_list(&text)?;
    log::info!("loaded {} moves from {}", moves.len(), path.display());
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn human_human_omits_computer_settings() {
        let settings = GameSettings {
            difficulty: Difficulty::Expert,
            algorithm: Algorithm::Negascout,
            ..GameSettings::new(GameMode::HumanHuman)
        };
        let req = settings.to_request();
        assert_eq!(req.difficulty, None);
        assert_eq!(req.algorithm, None);
        assert!(!req.from_file);
    }

    #[test]
    fn computer_games_carry_settings_and_moves() {
        let settings = GameSettings {
            algorithm: Algorithm::Negascout,
            initial_moves: vec![3, 4],
            ..GameSettings::new(GameMode::ComputerComputer)
        };
        let req = settings.to_request();
        assert_eq!(req.difficulty, Some(Difficulty::Medium));
        assert_eq!(req.algorithm, Some(Algorithm::Negascout));
        assert_eq!(req.initial_moves, vec![3, 4]);
        assert!(req.from_file);
    }

    #[test]
    fn parses_mixed_separators_and_comments() {
        let text = "# opening\n3, 3 4\n2,\t1 # reply\n\n6";
        assert_eq!(parse_move_list(text).unwrap(), vec![3, 3, 4, 2, 1, 6]);
        assert!(parse_move_list("").unwrap().is_empty());
    }

    #[test]
    fn rejects_out_of_range_tokens() {
        let err = parse_move_list("3 4 7").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid column '7' at position 2 (expected 0-6)"
        );
        assert!(parse_move_list("1 x").is_err());
        assert!(parse_move_list("-1").is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "3 2 4").unwrap();
        assert_eq!(load_move_list(file.path()).unwrap(), vec![3, 2, 4]);

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            load_move_list(&missing),
            Err(MoveListError::Read { .. })
        ));
    }
}
