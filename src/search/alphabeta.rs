//! Fixed-depth negamax search with alpha-beta pruning
//!
//! # Features
//!
//! - Fail-soft negamax with alpha-beta pruning over the proximity move list
//! - Strict greater-than selection, so equal scores keep the earliest
//!   candidate in row-major order
//! - Optional exact-score transposition table
//! - Optional root-parallel search on the rayon pool
//!
//! Pruning, the table and the parallel root are all result-preserving: the
//! chosen move and score always match [`Searcher::exhaustive`].
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Stone, Pos};
//! use gomoku::search::Searcher;
//!
//! let mut searcher = Searcher::new();
//! let mut board = Board::new();
//! board.place(Pos::new(7, 7), Stone::Black).unwrap();
//!
//! let result = searcher.search(&mut board, Stone::White, 2);
//! assert!(result.best_move.is_some());
//! ```

use rayon::prelude::*;

use crate::board::{Board, Pos, Stone};
use crate::config::EngineConfig;
use crate::eval::{evaluate_with, PatternWeights};

use super::movegen::{candidates, DEFAULT_RADIUS};
use super::{TTStats, TranspositionTable, ZobristTable};

/// Infinity score for alpha-beta bounds
pub const SCORE_INF: i32 = 1_000_000_000;

/// Score of a full board without a five
pub const DRAW_SCORE: i32 = 0;

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Total beta cutoffs (fail-high)
    pub beta_cutoffs: u64,
    /// Beta cutoffs on the first move tried
    pub first_move_cutoffs: u64,
    /// Static evaluations at depth 0
    pub leaf_evals: u64,
    /// Total TT probes
    pub tt_probes: u64,
    /// TT probes that returned a score
    pub tt_hits: u64,
}

impl SearchStats {
    /// First-move cutoff rate in percent
    pub fn first_move_rate(&self) -> f64 {
        if self.beta_cutoffs == 0 {
            0.0
        } else {
            self.first_move_cutoffs as f64 / self.beta_cutoffs as f64 * 100.0
        }
    }

    /// Merge another stats into this one (for combining worker stats)
    fn merge(&mut self, other: &SearchStats) {
        self.beta_cutoffs += other.beta_cutoffs;
        self.first_move_cutoffs += other.first_move_cutoffs;
        self.leaf_evals += other.leaf_evals;
        self.tt_probes += other.tt_probes;
        self.tt_hits += other.tt_hits;
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, `None` when the position is already decided,
    /// the board is full, or the depth is zero
    pub best_move: Option<Pos>,
    /// Negamax score from the searching side's perspective
    pub score: i32,
    /// Depth searched
    pub depth: u8,
    /// Total nodes visited, root included
    pub nodes: u64,
    /// Search diagnostics
    pub stats: SearchStats,
}

impl SearchResult {
    fn leaf(score: i32, depth: u8) -> Self {
        Self {
            best_move: None,
            score,
            depth,
            nodes: 1,
            stats: SearchStats::default(),
        }
    }
}

/// Alpha-beta searcher.
///
/// Holds the evaluation weights, the candidate radius and, optionally, a
/// transposition table that persists across searches until cleared.
pub struct Searcher {
    weights: PatternWeights,
    radius: u8,
    pruning: bool,
    zobrist: ZobristTable,
    tt: Option<TranspositionTable>,
    nodes: u64,
    stats: SearchStats,
}

impl Searcher {
    /// Searcher with default weights and radius, pruning on, no table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            weights: PatternWeights::DEFAULT,
            radius: DEFAULT_RADIUS,
            pruning: true,
            zobrist: ZobristTable::new(),
            tt: None,
            nodes: 0,
            stats: SearchStats::default(),
        }
    }

    /// Plain minimax: no pruning, no table. The reference every other
    /// configuration must agree with.
    #[must_use]
    pub fn exhaustive() -> Self {
        Self {
            pruning: false,
            ..Self::new()
        }
    }

    /// Searcher matching an engine configuration.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        let searcher = Self::new()
            .with_weights(config.weights)
            .with_radius(config.radius);
        if config.use_tt {
            searcher.with_tt(config.tt_size_mb)
        } else {
            searcher
        }
    }

    #[must_use]
    pub fn with_radius(mut self, radius: u8) -> Self {
        debug_assert!(radius >= 1);
        self.radius = radius;
        self
    }

    #[must_use]
    pub fn with_weights(mut self, weights: PatternWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Attach a transposition table of `size_mb` megabytes.
    #[must_use]
    pub fn with_tt(mut self, size_mb: usize) -> Self {
        self.tt = Some(TranspositionTable::new(size_mb));
        self
    }

    /// Fresh searcher with the same settings and no table, for one parallel
    /// root branch.
    fn worker(&self) -> Self {
        Self {
            weights: self.weights,
            radius: self.radius,
            pruning: self.pruning,
            ..Self::new()
        }
    }

    /// Search `depth` plies for `side` under the full window.
    ///
    /// The board is used as scratch space and is returned exactly as it was
    /// given, undo log included.
    ///
    /// # Panics
    ///
    /// Panics if `side` is `Stone::Empty`.
    pub fn search(&mut self, board: &mut Board, side: Stone, depth: u8) -> SearchResult {
        self.search_window(board, side, depth, -SCORE_INF, SCORE_INF)
    }

    /// Search with an explicit root window.
    ///
    /// # Panics
    ///
    /// Panics if `side` is `Stone::Empty`.
    pub fn search_window(
        &mut self,
        board: &mut Board,
        side: Stone,
        depth: u8,
        mut alpha: i32,
        beta: i32,
    ) -> SearchResult {
        assert!(side.is_side(), "search side must be Black or White");
        self.nodes = 1;
        self.stats = SearchStats::default();

        if let Some(score) = self.root_terminal(board, side, depth) {
            return SearchResult::leaf(score, depth);
        }

        let hash = self.zobrist.hash(board, side);
        let mut best_move = None;
        let mut best_score = -SCORE_INF;

        for (i, mv) in candidates(board, self.radius).into_iter().enumerate() {
            board.apply(mv, side);
            let child_hash = self.zobrist.update_place(hash, mv, side);
            let score = -self.negamax(
                board,
                side.opponent(),
                depth - 1,
                -beta,
                -alpha,
                mv,
                child_hash,
            );
            board.undo(mv);

            log::trace!("root {mv} scored {score}");

            if best_move.is_none() || score > best_score {
                best_score = score;
                best_move = Some(mv);
            }

            if self.pruning {
                alpha = alpha.max(score);
                if alpha >= beta {
                    self.record_cutoff(i);
                    break;
                }
            }
        }

        if best_move.is_none() {
            best_score = evaluate_with(board, side, &self.weights);
        }

        SearchResult {
            best_move,
            score: best_score,
            depth,
            nodes: self.nodes,
            stats: self.stats,
        }
    }

    /// Root-parallel search.
    ///
    /// Every root candidate is searched by its own worker on a private board
    /// copy with the full window and no table. Scores are reduced in
    /// candidate order with the same strict greater-than rule, so the result
    /// equals [`Searcher::search`] on the same position.
    ///
    /// # Panics
    ///
    /// Panics if `side` is `Stone::Empty`.
    pub fn search_parallel(&self, board: &Board, side: Stone, depth: u8) -> SearchResult {
        assert!(side.is_side(), "search side must be Black or White");

        if let Some(score) = self.root_terminal(board, side, depth) {
            return SearchResult::leaf(score, depth);
        }

        let moves = candidates(board, self.radius);
        let hash = self.zobrist.hash(board, side);

        let branches: Vec<(Pos, i32, u64, SearchStats)> = moves
            .par_iter()
            .map(|&mv| {
                let mut worker = self.worker();
                let mut local = board.clone();
                local.apply(mv, side);
                let child_hash = worker.zobrist.update_place(hash, mv, side);
                let score = -worker.negamax(
                    &mut local,
                    side.opponent(),
                    depth - 1,
                    -SCORE_INF,
                    SCORE_INF,
                    mv,
                    child_hash,
                );
                (mv, score, worker.nodes, worker.stats)
            })
            .collect();

        let mut result = SearchResult {
            best_move: None,
            score: -SCORE_INF,
            depth,
            nodes: 1,
            stats: SearchStats::default(),
        };

        for (mv, score, nodes, stats) in branches {
            log::trace!("root {mv} scored {score}");
            result.nodes += nodes;
            result.stats.merge(&stats);
            if result.best_move.is_none() || score > result.score {
                result.score = score;
                result.best_move = Some(mv);
            }
        }

        if result.best_move.is_none() {
            result.score = evaluate_with(board, side, &self.weights);
        }
        result
    }

    /// Terminal policy at the root: decided position, full board, depth 0.
    fn root_terminal(&self, board: &Board, side: Stone, depth: u8) -> Option<i32> {
        if board.winner().is_some() {
            Some(evaluate_with(board, side, &self.weights))
        } else if board.is_full() {
            Some(DRAW_SCORE)
        } else if depth == 0 {
            Some(evaluate_with(board, side, &self.weights))
        } else {
            None
        }
    }

    #[inline]
    fn record_cutoff(&mut self, move_index: usize) {
        self.stats.beta_cutoffs += 1;
        if move_index == 0 {
            self.stats.first_move_cutoffs += 1;
        }
    }

    /// Fail-soft negamax. `last` is the move that produced this position;
    /// a five can only have appeared through it.
    #[allow(clippy::too_many_arguments)]
    fn negamax(
        &mut self,
        board: &mut Board,
        side: Stone,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        last: Pos,
        hash: u64,
    ) -> i32 {
        self.nodes += 1;

        if board.has_five_at(last) {
            return evaluate_with(board, side, &self.weights);
        }
        if board.is_full() {
            return DRAW_SCORE;
        }
        if depth == 0 {
            self.stats.leaf_evals += 1;
            return evaluate_with(board, side, &self.weights);
        }

        if let Some(tt) = self.tt.as_mut() {
            self.stats.tt_probes += 1;
            if let Some(score) = tt.probe(hash, depth) {
                self.stats.tt_hits += 1;
                return score;
            }
        }

        let alpha_orig = alpha;
        let mut best = -SCORE_INF;
        let moves = candidates(board, self.radius);
        if moves.is_empty() {
            return evaluate_with(board, side, &self.weights);
        }

        for (i, mv) in moves.into_iter().enumerate() {
            board.apply(mv, side);
            let child_hash = self.zobrist.update_place(hash, mv, side);
            let score = -self.negamax(
                board,
                side.opponent(),
                depth - 1,
                -beta,
                -alpha,
                mv,
                child_hash,
            );
            board.undo(mv);

            best = best.max(score);

            if self.pruning {
                alpha = alpha.max(score);
                if alpha >= beta {
                    self.record_cutoff(i);
                    break;
                }
            }
        }

        // Only exact values go into the table
        let exact = !self.pruning || (alpha_orig < best && best < beta);
        if exact {
            if let Some(tt) = self.tt.as_mut() {
                tt.store(hash, depth, best);
            }
        }

        best
    }

    /// Clear the transposition table, if any.
    pub fn clear_tt(&mut self) {
        if let Some(tt) = self.tt.as_mut() {
            tt.clear();
        }
    }

    /// Transposition table usage, if a table is attached.
    #[must_use]
    pub fn tt_stats(&self) -> Option<TTStats> {
        self.tt.as_ref().map(TranspositionTable::stats)
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TOTAL_CELLS;

    const FIVE: i32 = PatternWeights::DEFAULT.five;

    fn full_board_without_five() -> Board {
        let mut board = Board::new();
        for idx in 0..TOTAL_CELLS {
            let pos = Pos::from_index(idx);
            let stone = if (pos.col as usize + 2 * (pos.row as usize % 2)) / 2 % 2 == 0 {
                Stone::Black
            } else {
                Stone::White
            };
            board.place_stone(pos, stone);
        }
        board
    }

    #[test]
    fn test_search_empty_board() {
        let mut searcher = Searcher::new();
        let mut board = Board::new();

        let result = searcher.search(&mut board, Stone::Black, 2);
        assert_eq!(result.best_move, Some(Pos::new(7, 7)));
    }

    #[test]
    fn test_search_finds_winning_move() {
        let mut searcher = Searcher::new();
        let mut board = Board::new();
        for i in 0..4 {
            board.place_stone(Pos::new(7, i), Stone::Black);
        }
        board.place_stone(Pos::new(9, 9), Stone::White);

        let result = searcher.search(&mut board, Stone::Black, 2);
        assert_eq!(result.best_move, Some(Pos::new(7, 4)));
        assert_eq!(result.score, FIVE);
    }

    #[test]
    fn test_search_blocks_opponent_win() {
        let mut searcher = Searcher::new();
        let mut board = Board::new();
        for i in 0..4 {
            board.place_stone(Pos::new(7, i), Stone::White);
        }
        board.place_stone(Pos::new(8, 0), Stone::Black);

        let result = searcher.search(&mut board, Stone::Black, 2);
        assert_eq!(result.best_move, Some(Pos::new(7, 4)));
        assert!(result.score > -FIVE);
    }

    #[test]
    fn test_search_existing_five_is_terminal() {
        let mut searcher = Searcher::new();
        let mut board = Board::new();
        for i in 0..5 {
            board.place_stone(Pos::new(3, 3 + i), Stone::Black);
        }

        let result = searcher.search(&mut board, Stone::White, 3);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -FIVE);
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn test_search_full_board_is_draw() {
        let mut searcher = Searcher::new();
        let mut board = full_board_without_five();

        let result = searcher.search(&mut board, Stone::Black, 4);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, DRAW_SCORE);
    }

    #[test]
    fn test_depth_zero_is_static_eval() {
        let mut searcher = Searcher::new();
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(7, 8), Stone::Black);

        let result = searcher.search(&mut board, Stone::Black, 0);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, PatternWeights::DEFAULT.open_two);
    }

    #[test]
    fn test_tie_break_takes_first_candidate() {
        let mut searcher = Searcher::new().with_radius(1);
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);

        // Every reply leaves only singles on the board
        let result = searcher.search(&mut board, Stone::White, 1);
        assert_eq!(result.best_move, Some(Pos::new(6, 6)));
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_board_unchanged_after_search() {
        let mut searcher = Searcher::new().with_tt(1);
        let mut board = Board::new();
        board.place(Pos::new(7, 7), Stone::Black).unwrap();
        board.place(Pos::new(8, 8), Stone::White).unwrap();
        board.place(Pos::new(7, 8), Stone::Black).unwrap();
        let before = board.clone();

        let _ = searcher.search(&mut board, Stone::White, 3);
        assert_eq!(board, before);
    }

    #[test]
    fn test_pruning_matches_exhaustive() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(7, 8), Stone::White);
        board.place_stone(Pos::new(8, 7), Stone::Black);

        let reference = Searcher::exhaustive()
            .with_radius(1)
            .search(&mut board, Stone::White, 3);
        let pruned = Searcher::new()
            .with_radius(1)
            .search(&mut board, Stone::White, 3);
        let cached = Searcher::new()
            .with_radius(1)
            .with_tt(1)
            .search(&mut board, Stone::White, 3);

        assert_eq!(pruned.best_move, reference.best_move);
        assert_eq!(pruned.score, reference.score);
        assert_eq!(cached.best_move, reference.best_move);
        assert_eq!(cached.score, reference.score);
        assert!(pruned.nodes < reference.nodes);
        assert_eq!(reference.stats.beta_cutoffs, 0);
        assert_eq!(reference.stats.first_move_rate(), 0.0);

        let rate = pruned.stats.first_move_rate();
        assert!(pruned.stats.beta_cutoffs > 0);
        assert!((0.0..=100.0).contains(&rate));
    }

    #[test]
    fn test_first_move_rate() {
        let stats = SearchStats {
            beta_cutoffs: 8,
            first_move_cutoffs: 6,
            ..SearchStats::default()
        };
        assert_eq!(stats.first_move_rate(), 75.0);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(6, 8), Stone::White);
        board.place_stone(Pos::new(7, 8), Stone::Black);

        let mut searcher = Searcher::new().with_radius(1);
        let serial = searcher.search(&mut board, Stone::White, 2);
        let parallel = searcher.search_parallel(&board, Stone::White, 2);

        assert_eq!(parallel.best_move, serial.best_move);
        assert_eq!(parallel.score, serial.score);
    }

    #[test]
    fn test_tt_used_and_clearable() {
        let mut searcher = Searcher::new().with_radius(1).with_tt(1);
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(7, 8), Stone::White);

        let result = searcher.search(&mut board, Stone::Black, 3);
        assert!(result.stats.tt_probes > 0);
        assert!(searcher.tt_stats().unwrap().used > 0);

        searcher.clear_tt();
        assert_eq!(searcher.tt_stats().unwrap().used, 0);
        assert!(Searcher::new().tt_stats().is_none());
    }

    #[test]
    fn test_search_deterministic() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(8, 6), Stone::White);

        let mut searcher = Searcher::new().with_tt(1);
        let first = searcher.search(&mut board, Stone::Black, 2);
        let second = searcher.search(&mut board, Stone::Black, 2);
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.score, second.score);
    }

    #[test]
    #[should_panic(expected = "search side")]
    fn test_empty_side_panics() {
        let mut board = Board::new();
        let _ = Searcher::new().search(&mut board, Stone::Empty, 1);
    }
}
