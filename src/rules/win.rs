//! Win condition checking: five or more stones in a row (overlines count).

use crate::board::{Board, Pos, Stone, BOARD_SIZE};

/// Direction vectors for line checking (4 directions)
pub(crate) const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// Check if there's 5+ in a row for the given color
pub fn has_five_in_row(board: &Board, stone: Stone) -> bool {
    find_five_positions(board, stone).is_some()
}

/// Length of the run of `color` through `pos` along one direction,
/// counting `pos` itself whatever it holds.
#[inline]
fn run_through(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> usize {
    let mut count = 1;
    for sign in [1, -1] {
        let mut r = i32::from(pos.row) + dr * sign;
        let mut c = i32::from(pos.col) + dc * sign;
        while Pos::is_valid(r, c) && board.get(Pos::new(r as u8, c as u8)) == color {
            count += 1;
            r += dr * sign;
            c += dc * sign;
        }
    }
    count
}

/// Fast five-in-a-row check at a specific position.
///
/// Only checks 4 directions from the given position. No allocation.
/// Also answers "would `color` make five by playing at `pos`" when `pos`
/// is empty, since the cell itself is always counted.
#[inline]
pub fn has_five_at_pos(board: &Board, pos: Pos, color: Stone) -> bool {
    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| run_through(board, pos, dr, dc, color) >= 5)
}

/// Find the positions of a 5-in-a-row if exists
///
/// Returns Some(Vec<Pos>) with at least 5 positions if a winning line exists,
/// None otherwise.
pub fn find_five_positions(board: &Board, stone: Stone) -> Option<Vec<Pos>> {
    let stones = board.stones(stone)?;

    for pos in stones.iter_ones() {
        for &(dr, dc) in &DIRECTIONS {
            // Only start from the first stone of a run
            let pr = i32::from(pos.row) - dr;
            let pc = i32::from(pos.col) - dc;
            if Pos::is_valid(pr, pc) && board.get(Pos::new(pr as u8, pc as u8)) == stone {
                continue;
            }

            let mut line = vec![pos];
            let mut r = i32::from(pos.row) + dr;
            let mut c = i32::from(pos.col) + dc;
            while Pos::is_valid(r, c) {
                let next = Pos::new(r as u8, c as u8);
                if board.get(next) != stone {
                    break;
                }
                line.push(next);
                r += dr;
                c += dc;
            }

            if line.len() >= 5 {
                return Some(line);
            }
        }
    }
    None
}

/// Check for a winner
///
/// Returns `Some(Stone)` if either side has five in a row. If a hand-built
/// position gives both sides a five, Black is reported.
pub fn check_winner(board: &Board) -> Option<Stone> {
    [Stone::Black, Stone::White]
        .into_iter()
        .find(|&stone| has_five_in_row(board, stone))
}

/// Empty cells where `color` would complete five, in row-major order.
pub fn winning_moves(board: &Board, color: Stone) -> Vec<Pos> {
    let mut moves = Vec::new();
    for r in 0..BOARD_SIZE as u8 {
        for c in 0..BOARD_SIZE as u8 {
            let pos = Pos::new(r, c);
            if board.is_empty(pos) && has_five_at_pos(board, pos, color) {
                moves.push(pos);
            }
        }
    }
    moves
}
