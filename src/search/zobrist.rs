//! Zobrist hashing for position identification
//!
//! Zobrist hashing allows O(1) incremental hash updates when placing/removing stones.
//! The search keys its transposition table on these hashes.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Stone, Pos};
//! use gomoku::search::ZobristTable;
//!
//! let zt = ZobristTable::new();
//! let mut board = Board::new();
//!
//! let hash1 = zt.hash(&board, Stone::Black);
//!
//! let pos = Pos::new(7, 7);
//! board.place_stone(pos, Stone::Black);
//! let hash2 = zt.hash(&board, Stone::White);
//!
//! // Incremental update is equivalent to full recomputation
//! assert_eq!(zt.update_place(hash1, pos, Stone::Black), hash2);
//! ```

use crate::board::{Board, Pos, Stone, TOTAL_CELLS};

/// Zobrist hash table for position hashing.
///
/// One random key per (cell, color) plus a side-to-move key.
pub struct ZobristTable {
    black: [u64; TOTAL_CELLS],
    white: [u64; TOTAL_CELLS],
    /// XORed in when Black is to move
    black_to_move: u64,
}

impl ZobristTable {
    /// Create a table with deterministic pseudo-random keys.
    ///
    /// A fixed-seed LCG (Knuth's MMIX constants) gives the same keys on
    /// every run.
    #[must_use]
    pub fn new() -> Self {
        let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
        let mut next_rand = || {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1);
            seed
        };

        let mut black = [0u64; TOTAL_CELLS];
        let mut white = [0u64; TOTAL_CELLS];
        for i in 0..TOTAL_CELLS {
            black[i] = next_rand();
            white[i] = next_rand();
        }

        Self {
            black,
            white,
            black_to_move: next_rand(),
        }
    }

    /// Compute the full hash for a board position.
    #[must_use]
    pub fn hash(&self, board: &Board, side_to_move: Stone) -> u64 {
        let mut h = 0u64;

        for pos in board.black.iter_ones() {
            h ^= self.black[pos.to_index()];
        }
        for pos in board.white.iter_ones() {
            h ^= self.white[pos.to_index()];
        }

        if side_to_move == Stone::Black {
            h ^= self.black_to_move;
        }
        h
    }

    #[inline]
    fn stone_key(&self, pos: Pos, stone: Stone) -> u64 {
        let idx = pos.to_index();
        match stone {
            Stone::Black => self.black[idx],
            Stone::White => self.white[idx],
            Stone::Empty => 0,
        }
    }

    /// Hash after `stone` is placed at `pos` and the turn passes.
    #[inline]
    #[must_use]
    pub fn update_place(&self, hash: u64, pos: Pos, stone: Stone) -> u64 {
        hash ^ self.stone_key(pos, stone) ^ self.black_to_move
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}
