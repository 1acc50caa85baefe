use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::game::Player;

use super::store::lock;

/// Append-only text log of moves played against the service.
#[derive(Debug)]
pub struct MoveJournal {
    path: PathBuf,
    file: Mutex<File>,
}

impl MoveJournal {
    /// Open (creating if needed) the journal at `path` for appending.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(MoveJournal {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line for a move.
    pub fn record(&self, game_id: u64, player: Player, column: usize) -> io::Result<()> {
        let line = format_entry(game_id, player, column, chrono::Local::now());
        let mut file = lock(&self.file);
        file.write_all(line.as_bytes())?;
        file.flush()
    }
}

fn format_entry<Tz>(game_id: u64, player: Player, column: usize, time: chrono::DateTime<Tz>) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "Game ID: {}, Player: {}, Column: {}, Time: {}\n",
        game_id,
        player.number(),
        column,
        time.format("%Y-%m-%d %H:%M:%S%.6f")
    )
}
