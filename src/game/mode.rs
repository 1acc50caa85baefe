use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Player;

/// Who controls each side of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    HumanHuman,
    HumanComputer,
    ComputerComputer,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [
        GameMode::HumanHuman,
        GameMode::HumanComputer,
        GameMode::ComputerComputer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::HumanHuman => "human-human",
            GameMode::HumanComputer => "human-computer",
            GameMode::ComputerComputer => "computer-computer",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GameMode::HumanHuman => "Human vs Human",
            GameMode::HumanComputer => "Human vs Computer",
            GameMode::ComputerComputer => "Computer vs Computer",
        }
    }

    /// Whether a computer opponent is involved, and thus a difficulty is needed.
    pub fn has_computer(self) -> bool {
        self != GameMode::HumanHuman
    }

    /// Whether `player` is driven by the computer in this mode.
    pub fn is_computer(self, player: Player) -> bool {
        match self {
            GameMode::HumanHuman => false,
            GameMode::HumanComputer => player == Player::Two,
            GameMode::ComputerComputer => true,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| format!("unknown game type '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Expert];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown difficulty '{s}'"))
    }
}

/// Search algorithm used by the computer player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Minimax,
    Negascout,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Minimax, Algorithm::Negascout];

    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Minimax => "minimax",
            Algorithm::Negascout => "negascout",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("unknown algorithm '{s}'"))
    }
}
