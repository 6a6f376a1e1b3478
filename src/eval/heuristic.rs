//! Heuristic evaluation function for Gomoku board positions
//!
//! Every line of length five or more (rows, columns and both diagonal
//! directions) is scanned once. Each maximal run of one color is classified
//! by its length and open ends, and the weights of the perspective side's
//! patterns are summed against the opponent's.

use crate::board::{Board, Pos, Stone, BOARD_SIZE};
use crate::rules::win::DIRECTIONS;

use super::patterns::{PatternCounts, PatternKind, PatternWeights};

/// Lines shorter than this can never hold a five
const MIN_LINE_LEN: usize = 5;

/// Evaluate the board from the perspective of the given color using the
/// default weight table.
///
/// Returns a score where:
/// - Positive values indicate advantage for `color`
/// - Negative values indicate disadvantage for `color`
/// - `PatternWeights::DEFAULT.five` means `color` has five in a row
/// - `-PatternWeights::DEFAULT.five` means the opponent does
#[must_use]
pub fn evaluate(board: &Board, color: Stone) -> i32 {
    evaluate_with(board, color, &PatternWeights::DEFAULT)
}

/// Evaluate the board from `color`'s perspective with an explicit weight table.
///
/// A five short-circuits everything else: the result is exactly
/// `+weights.five` if `color` owns one, otherwise `-weights.five` if the
/// opponent does. Without a five the score is symmetric,
/// `evaluate_with(b, Black, w) == -evaluate_with(b, White, w)`.
#[must_use]
pub fn evaluate_with(board: &Board, color: Stone, weights: &PatternWeights) -> i32 {
    debug_assert!(color.is_side());
    let [black, white] = scan_patterns(board);
    let (mine, theirs) = match color {
        Stone::White => (white, black),
        _ => (black, white),
    };

    if mine.has_five() {
        return weights.five;
    }
    if theirs.has_five() {
        return -weights.five;
    }

    weights.score(&mine) - weights.score(&theirs)
}

/// Count the patterns of both sides, `[black, white]`.
pub fn scan_patterns(board: &Board) -> [PatternCounts; 2] {
    let mut counts = [PatternCounts::default(); 2];
    let mut line = [Stone::Empty; BOARD_SIZE];

    for &(dr, dc) in &DIRECTIONS {
        for r in 0..BOARD_SIZE as i32 {
            for c in 0..BOARD_SIZE as i32 {
                // A line starts where the previous cell falls off the board
                if Pos::is_valid(r - dr, c - dc) {
                    continue;
                }
                let len = collect_line(board, r, c, dr, dc, &mut line);
                if len >= MIN_LINE_LEN {
                    scan_line(&line[..len], &mut counts);
                }
            }
        }
    }

    counts
}

/// Copy the cells of one line into `buf`, returning its length.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn collect_line(
    board: &Board,
    mut r: i32,
    mut c: i32,
    dr: i32,
    dc: i32,
    buf: &mut [Stone; BOARD_SIZE],
) -> usize {
    let mut len = 0;
    while Pos::is_valid(r, c) {
        buf[len] = board.get(Pos::new(r as u8, c as u8));
        len += 1;
        r += dr;
        c += dc;
    }
    len
}

/// Classify every maximal run of stones in one line.
fn scan_line(cells: &[Stone], counts: &mut [PatternCounts; 2]) {
    let mut i = 0;
    while i < cells.len() {
        let color = cells[i];
        if color == Stone::Empty {
            i += 1;
            continue;
        }

        let start = i;
        while i < cells.len() && cells[i] == color {
            i += 1;
        }

        let left_open = start > 0 && cells[start - 1] == Stone::Empty;
        let right_open = i < cells.len() && cells[i] == Stone::Empty;
        let open_ends = u8::from(left_open) + u8::from(right_open);

        if let Some(kind) = PatternKind::classify(i - start, open_ends) {
            let side = if color == Stone::Black { 0 } else { 1 };
            counts[side].add(kind);
        }
    }
}
