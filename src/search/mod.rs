//! Search module for Gomoku AI
//!
//! Contains:
//! - Candidate move generation around existing stones
//! - Zobrist hashing for position identification
//! - Transposition table for caching exact subtree scores
//! - Fixed-depth alpha-beta search, serial or root-parallel

pub mod alphabeta;
pub mod movegen;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{SearchResult, SearchStats, Searcher, DRAW_SCORE, SCORE_INF};
pub use movegen::{candidates, DEFAULT_RADIUS};
pub use tt::{TTEntry, TTStats, TranspositionTable, MAX_TT_SIZE_MB};
pub use zobrist::ZobristTable;
