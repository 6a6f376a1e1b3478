//! Gomoku AI engine with fixed-depth Minimax search
//!
//! A Gomoku engine for the classic free-style rules:
//! - 15x15 board, Black moves first
//! - 5 or more in a row wins (overlines count)
//! - No captures, no forbidden moves
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards and an undo log
//! - [`rules`]: Five-in-a-row detection
//! - [`eval`]: Line pattern evaluation
//! - [`search`]: Move generation, alpha-beta search, transposition table
//! - [`engine`]: Main AI engine integrating all components
//! - [`game`]: Human-versus-engine turn state machine
//! - [`config`]: TOML-loadable engine settings
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{AIEngine, Board, EngineConfig, Stone, Pos};
//!
//! let mut board = Board::new();
//! let mut engine = AIEngine::with_config(EngineConfig {
//!     depth: 2,
//!     ..EngineConfig::default()
//! })
//! .unwrap();
//!
//! board.place(Pos::new(7, 7), Stone::Black).unwrap();
//!
//! // AI responds as White
//! if let Some(pos) = engine.get_move(&board, Stone::White) {
//!     board.place(pos, Stone::White).unwrap();
//!     println!("AI plays at {pos}");
//! }
//! ```
//!
//! # Search Priority
//!
//! The AI engine follows this search priority:
//! 1. Center on an empty board
//! 2. Immediate winning move
//! 3. Block the opponent's immediate win
//! 4. Alpha-Beta search to the configured depth
//!
//! Pruning, the transposition table and the root-parallel mode never change
//! the chosen move: all of them agree with plain exhaustive Minimax.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, BOARD_SIZE, CENTER};
pub use config::EngineConfig;
pub use engine::{AIEngine, MoveResult, SearchType};
pub use error::{ConfigError, GameError, MoveRejection};
pub use game::{GameOutcome, GameSession, Phase};
pub use search::{SearchResult, Searcher};
