//! Board structure with an undo log

use std::fmt;

use super::bitboard::Bitboard;
use super::{Pos, Stone, BOARD_SIZE, TOTAL_CELLS};
use crate::error::{GameError, MoveRejection};
use crate::rules::{check_winner, has_five_at_pos};

/// Game board
///
/// Cells live in two row-major bitboards, one per color. Moves made through
/// [`Board::place`] are recorded in an undo log so the search can apply and
/// retract moves on a single working board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Black stones bitboard
    pub black: Bitboard,
    /// White stones bitboard
    pub white: Bitboard,
    /// Moves in the order they were placed
    history: Vec<MoveRecord>,
}

/// Record of a placed stone, kept for undo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub pos: Pos,
    pub stone: Stone,
}

impl Board {
    pub fn new() -> Self {
        Self {
            black: Bitboard::new(),
            white: Bitboard::new(),
            history: Vec::with_capacity(TOTAL_CELLS),
        }
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.black.get(pos) && !self.white.get(pos)
    }

    /// Place a stone for `stone`'s side, recording it in the undo log.
    ///
    /// Fails if the position is off the board, the cell is occupied, or
    /// `stone` is `Stone::Empty`.
    pub fn place(&mut self, pos: Pos, stone: Stone) -> Result<(), GameError> {
        let reason = if !pos.in_bounds() {
            Some(MoveRejection::OutOfBounds)
        } else if !stone.is_side() {
            Some(MoveRejection::NoSide)
        } else if !self.is_empty(pos) {
            Some(MoveRejection::Occupied)
        } else {
            None
        };

        match reason {
            Some(reason) => Err(GameError::InvalidMove { pos, reason }),
            None => {
                self.apply(pos, stone);
                Ok(())
            }
        }
    }

    /// Unchecked, logged placement used by the search on generated moves.
    #[inline]
    pub(crate) fn apply(&mut self, pos: Pos, stone: Stone) {
        debug_assert!(self.is_empty(pos) && stone.is_side());
        self.place_stone(pos, stone);
        self.history.push(MoveRecord { pos, stone });
    }

    /// Restore `pos` to Empty and drop its undo-log record.
    ///
    /// Returns the stone that was removed (`Stone::Empty` if the cell was
    /// already empty).
    pub fn undo(&mut self, pos: Pos) -> Stone {
        let removed = self.get(pos);
        self.remove_stone(pos);
        if let Some(idx) = self.history.iter().rposition(|r| r.pos == pos) {
            self.history.remove(idx);
        }
        removed
    }

    /// Retract the most recent logged move
    pub fn undo_last(&mut self) -> Option<MoveRecord> {
        let record = self.history.pop()?;
        self.remove_stone(record.pos);
        Some(record)
    }

    /// Place a stone without validation or logging.
    /// Use `place` for game moves; this is for setting up positions.
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) {
        match stone {
            Stone::Black => self.black.set(pos),
            Stone::White => self.white.set(pos),
            Stone::Empty => {}
        }
    }

    /// Remove a stone
    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        self.black.clear(pos);
        self.white.clear(pos);
    }

    /// Get bitboard for a color (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        }
    }

    /// Number of stones of one color
    #[inline]
    pub fn count(&self, stone: Stone) -> u32 {
        self.stones(stone).map_or(0, Bitboard::count)
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    /// Every cell is occupied
    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == TOTAL_CELLS
    }

    /// Black moves first, so Black is to move whenever the counts are equal.
    #[inline]
    pub fn side_to_move(&self) -> Stone {
        if self.black.count() <= self.white.count() {
            Stone::Black
        } else {
            Stone::White
        }
    }

    /// Side with five (or more) in a row, if any
    pub fn winner(&self) -> Option<Stone> {
        check_winner(self)
    }

    /// Five in a row through `pos` for whoever owns that cell
    #[inline]
    pub fn has_five_at(&self, pos: Pos) -> bool {
        let stone = self.get(pos);
        stone.is_side() && has_five_at_pos(self, pos, stone)
    }

    /// Game over: a five exists or no empty cell remains
    pub fn is_terminal(&self) -> bool {
        self.is_full() || self.winner().is_some()
    }

    /// Most recent logged move
    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.history.last().map(|r| r.pos)
    }

    /// Logged moves, oldest first
    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..BOARD_SIZE {
            write!(f, "{:2}", c)?;
        }
        writeln!(f)?;

        for r in 0..BOARD_SIZE {
            write!(f, "{:2} ", r)?;
            for c in 0..BOARD_SIZE {
                let ch = match self.get(Pos::new(r as u8, c as u8)) {
                    Stone::Black => " X",
                    Stone::White => " O",
                    Stone::Empty => " .",
                };
                f.write_str(ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
