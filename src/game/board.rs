use serde::{Deserialize, Serialize};

use crate::error::MoveError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Board coordinate as `(row, col)`, row 0 being the top row.
pub type Position = (usize, usize);

/// Line directions as (row step, col step): horizontal, vertical, `/`, `\`.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (-1, 1), (1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Cell {
    #[default]
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> u8 {
        match cell {
            Cell::Empty => 0,
            Cell::PlayerOne => 1,
            Cell::PlayerTwo => 2,
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::PlayerOne),
            2 => Ok(Cell::PlayerTwo),
            other => Err(format!("invalid cell value {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Check if a column is full (its top cell is occupied)
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Columns that can still take a piece, left to right.
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, cell: Cell) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }

        if self.is_column_full(col) {
            return Err(MoveError::ColumnFull(col));
        }

        // Find the lowest empty row in this column
        let row = (0..ROWS)
            .rev()
            .find(|&row| self.cells[row][col] == Cell::Empty)
            .ok_or(MoveError::ColumnFull(col))?;
        self.cells[row][col] = cell;
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// Check if the piece at (row, col) is part of four or more in a line
    pub fn check_win(&self, row: usize, col: usize) -> bool {
        let cell = self.get(row, col);
        if cell == Cell::Empty {
            return false;
        }

        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| self.line_through(row, col, dr, dc).len() >= 4)
    }

    /// Every cell of every line of four or more through (row, col).
    ///
    /// Lines are reported horizontal first, then vertical and the two
    /// diagonals; a cell shared by two lines is listed once.
    pub fn winning_cells(&self, row: usize, col: usize) -> Vec<Position> {
        if self.get(row, col) == Cell::Empty {
            return Vec::new();
        }

        let mut cells: Vec<Position> = Vec::new();
        for &(dr, dc) in &DIRECTIONS {
            let line = self.line_through(row, col, dr, dc);
            if line.len() < 4 {
                continue;
            }
            for pos in line {
                if !cells.contains(&pos) {
                    cells.push(pos);
                }
            }
        }
        cells
    }

    /// The contiguous run of equal pieces through (row, col) along a direction,
    /// ordered from the negative end to the positive end.
    fn line_through(&self, row: usize, col: usize, dr: isize, dc: isize) -> Vec<Position> {
        let cell = self.get(row, col);
        let mut start = (row as isize, col as isize);

        // Walk backwards to the start of the run
        loop {
            let (r, c) = (start.0 - dr, start.1 - dc);
            if !Self::in_bounds(r, c) || self.cells[r as usize][c as usize] != cell {
                break;
            }
            start = (r, c);
        }

        let mut line = Vec::new();
        let (mut r, mut c) = start;
        while Self::in_bounds(r, c) && self.cells[r as usize][c as usize] == cell {
            line.push((r as usize, c as usize));
            r += dr;
            c += dc;
        }
        line
    }

    fn in_bounds(row: isize, col: isize) -> bool {
        row >= 0 && row < ROWS as isize && col >= 0 && col < COLS as isize
    }
}
