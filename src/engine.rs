//! Main AI engine on top of the alpha-beta searcher
//!
//! The engine answers "where should `color` play" for any board. It follows
//! a short priority list before falling back to the full search:
//!
//! 1. **Game over**: a five on the board or a full board yields no move
//! 2. **Opening**: the first stone of the game goes to the center
//! 3. **Immediate win**: complete five if possible
//! 4. **Defense**: otherwise block the opponent's five
//! 5. **Alpha-Beta**: fixed-depth search, serial or root-parallel
//!
//! Steps 3 and 4 only run when `tactical_shortcuts` is enabled. Without them
//! an open four is only blocked at depth 1: deeper searches see every reply
//! lose and keep the first candidate.
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Board, EngineConfig, Stone, Pos};
//!
//! let config = EngineConfig { depth: 2, ..EngineConfig::default() };
//! let mut engine = AIEngine::with_config(config).unwrap();
//! let mut board = Board::new();
//! board.place(Pos::new(7, 7), Stone::Black).unwrap();
//!
//! let result = engine.get_move_with_stats(&board, Stone::White);
//! println!("Best move: {:?}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::time::Instant;

use crate::board::{Board, Pos, Stone, CENTER};
use crate::config::EngineConfig;
use crate::error::{ConfigError, GameError};
use crate::eval::evaluate_with;
use crate::rules::winning_moves;
use crate::search::{SearchResult, Searcher, TTStats};

/// Which step of the engine produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Position already decided or board full; no move
    GameOver,
    /// First move of the game, played at the center
    Opening,
    /// Move completes five in a row
    ImmediateWin,
    /// Move blocks the opponent's five
    Defense,
    /// Regular alpha-beta search result
    AlphaBeta,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Score from the moving side's perspective
    pub score: i32,
    /// Engine step that found this move
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn shortcut(pos: Option<Pos>, score: i32, search_type: SearchType, start: Instant) -> Self {
        Self {
            best_move: pos,
            score,
            search_type,
            time_ms: elapsed_ms(start),
            nodes: 1,
        }
    }

    #[inline]
    fn from_alphabeta(result: SearchResult, start: Instant) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type: SearchType::AlphaBeta,
            time_ms: elapsed_ms(start),
            nodes: result.nodes,
        }
    }
}

#[inline]
fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Main AI Engine for Gomoku.
///
/// Owns a [`Searcher`] built from an [`EngineConfig`]; a transposition table,
/// when enabled, is kept across moves until [`AIEngine::clear_cache`].
///
/// ```
/// use gomoku::{AIEngine, Board, Stone, Pos};
///
/// let mut engine = AIEngine::new();
/// let mut board = Board::new();
/// board.place(Pos::new(7, 7), Stone::Black).unwrap();
/// board.place(Pos::new(7, 8), Stone::White).unwrap();
///
/// if let Some(best_move) = engine.get_move(&board, Stone::Black) {
///     println!("Play at {best_move}");
/// }
/// ```
pub struct AIEngine {
    searcher: Searcher,
    config: EngineConfig,
}

impl AIEngine {
    /// Engine with the default configuration (depth 4, radius 2, TT on).
    #[must_use]
    pub fn new() -> Self {
        let config = EngineConfig::default();
        Self {
            searcher: Searcher::from_config(&config),
            config,
        }
    }

    /// Engine with a custom configuration, validated first.
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            searcher: Searcher::from_config(&config),
            config,
        })
    }

    /// Current configuration
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Change the search depth. The transposition table is kept.
    pub fn set_depth(&mut self, depth: u8) -> Result<(), ConfigError> {
        let config = EngineConfig {
            depth,
            ..self.config.clone()
        };
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Best move for `color`, or `None` when the game is already over.
    #[must_use]
    pub fn get_move(&mut self, board: &Board, color: Stone) -> Option<Pos> {
        self.get_move_with_stats(board, color).best_move
    }

    /// Best move for `color`, failing with [`GameError::NoLegalMove`] when
    /// none exists.
    pub fn choose_move(&mut self, board: &Board, color: Stone) -> Result<Pos, GameError> {
        self.get_move(board, color).ok_or(GameError::NoLegalMove)
    }

    /// Get the best move with detailed search statistics.
    ///
    /// # Panics
    ///
    /// Panics if `color` is `Stone::Empty`.
    #[must_use]
    pub fn get_move_with_stats(&mut self, board: &Board, color: Stone) -> MoveResult {
        assert!(color.is_side(), "engine color must be Black or White");
        let start = Instant::now();
        let result = self.select(board, color, start);

        log::debug!(
            "{color} {:?}: move={:?} score={} nodes={} time={}ms",
            result.search_type,
            result.best_move,
            result.score,
            result.nodes,
            result.time_ms
        );
        result
    }

    fn select(&mut self, board: &Board, color: Stone, start: Instant) -> MoveResult {
        let weights = &self.config.weights;

        if board.winner().is_some() {
            let score = evaluate_with(board, color, weights);
            return MoveResult::shortcut(None, score, SearchType::GameOver, start);
        }
        if board.is_full() {
            return MoveResult::shortcut(None, 0, SearchType::GameOver, start);
        }

        if board.is_board_empty() {
            return MoveResult::shortcut(Some(CENTER), 0, SearchType::Opening, start);
        }

        if self.config.tactical_shortcuts {
            if let Some(&win) = winning_moves(board, color).first() {
                return MoveResult::shortcut(
                    Some(win),
                    weights.five,
                    SearchType::ImmediateWin,
                    start,
                );
            }

            if let Some(&block) = winning_moves(board, color.opponent()).first() {
                let mut after = board.clone();
                after.place_stone(block, color);
                let score = evaluate_with(&after, color, weights);
                return MoveResult::shortcut(Some(block), score, SearchType::Defense, start);
            }
        }

        let depth = self.config.depth;
        let result = if self.config.parallel {
            self.searcher.search_parallel(board, color, depth)
        } else {
            let mut work_board = board.clone();
            self.searcher.search(&mut work_board, color, depth)
        };
        log::debug!(
            "depth {depth}: {} cutoffs ({:.1}% on first move), {}/{} tt hits",
            result.stats.beta_cutoffs,
            result.stats.first_move_rate(),
            result.stats.tt_hits,
            result.stats.tt_probes
        );
        MoveResult::from_alphabeta(result, start)
    }

    /// Clear the transposition table (call when starting a new game).
    pub fn clear_cache(&mut self) {
        self.searcher.clear_tt();
    }

    /// Transposition table usage, if the table is enabled.
    #[must_use]
    pub fn tt_stats(&self) -> Option<TTStats> {
        self.searcher.tt_stats()
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}
