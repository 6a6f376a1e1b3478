//! Board representation for Gomoku

pub mod bitboard;
pub mod board;


use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

// Re-exports
pub use bitboard::Bitboard;
pub use board::{Board, MoveRecord};

/// Board size (15x15)
pub const BOARD_SIZE: usize = 15;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 225

/// Center intersection, the opening move on an empty board
pub const CENTER: Pos = Pos {
    row: (BOARD_SIZE / 2) as u8,
    col: (BOARD_SIZE / 2) as u8,
};

/// Stone colors. `Black` and `White` double as the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stone {
    Empty,
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    /// True for `Black` and `White`
    #[inline]
    pub fn is_side(self) -> bool {
        self != Stone::Empty
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stone::Empty => "Empty",
            Stone::Black => "Black",
            Stone::White => "White",
        };
        f.write_str(name)
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE as u8 && col < BOARD_SIZE as u8);
        Self { row, col }
    }

    /// Checked constructor for coordinates coming from outside the engine.
    pub fn try_new(row: usize, col: usize) -> Result<Self, GameError> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Ok(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(GameError::ParsePos(format!(
                "({row}, {col}) is outside the {BOARD_SIZE}x{BOARD_SIZE} board"
            )))
        }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }

    /// Whether this position lies on the board. `Pos` fields are public,
    /// so a value built by hand may not.
    #[inline]
    pub fn in_bounds(self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl FromStr for Pos {
    type Err = GameError;

    /// Parses `"row,col"`, e.g. `"7,7"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .trim()
            .split_once(',')
            .ok_or_else(|| GameError::ParsePos(format!("expected \"row,col\", got {s:?}")))?;
        let row: usize = row
            .trim()
            .parse()
            .map_err(|_| GameError::ParsePos(format!("bad row in {s:?}")))?;
        let col: usize = col
            .trim()
            .parse()
            .map_err(|_| GameError::ParsePos(format!("bad column in {s:?}")))?;
        Pos::try_new(row, col)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}
