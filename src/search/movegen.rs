//! Candidate move generation with proximity filtering
//!
//! Only empty cells near existing stones are worth searching. The candidate
//! list is built as a bitboard mask and read back in row-major order, which
//! is also the tie-break order of the search.

use crate::board::{Bitboard, Board, Pos, CENTER};

/// Default Chebyshev neighborhood radius around placed stones
pub const DEFAULT_RADIUS: u8 = 2;

/// Generate the candidate moves for the position.
///
/// - Empty board: exactly `[CENTER]`.
/// - Otherwise: every empty cell within Chebyshev distance `radius` of any
///   stone, each listed once, in row-major order.
///
/// With `radius >= 1` the list is non-empty whenever the board holds a stone
/// and is not full.
#[must_use]
pub fn candidates(board: &Board, radius: u8) -> Vec<Pos> {
    if board.is_board_empty() {
        return vec![CENTER];
    }

    let radius = i32::from(radius);
    let mut mask = Bitboard::new();

    for pos in board.black.iter_ones().chain(board.white.iter_ones()) {
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                let r = i32::from(pos.row) + dr;
                let c = i32::from(pos.col) + dc;
                if !Pos::is_valid(r, c) {
                    continue;
                }

                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let near = Pos::new(r as u8, c as u8);
                if board.is_empty(near) {
                    mask.set(near);
                }
            }
        }
    }

    mask.iter_ones().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Stone, BOARD_SIZE, TOTAL_CELLS};

    #[test]
    fn test_empty_board_center_only() {
        let board = Board::new();
        assert_eq!(candidates(&board, DEFAULT_RADIUS), vec![CENTER]);
        assert_eq!(candidates(&board, 1), vec![Pos::new(7, 7)]);
    }

    #[test]
    fn test_single_stone_radius_two() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);

        let moves = candidates(&board, 2);
        assert_eq!(moves.len(), 24);
        assert_eq!(moves[0], Pos::new(5, 5));
        assert_eq!(moves[23], Pos::new(9, 9));
        assert!(!moves.contains(&Pos::new(7, 7)));
    }

    #[test]
    fn test_radius_one_row_major() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);

        assert_eq!(
            candidates(&board, 1),
            vec![
                Pos::new(6, 6),
                Pos::new(6, 7),
                Pos::new(6, 8),
                Pos::new(7, 6),
                Pos::new(7, 8),
                Pos::new(8, 6),
                Pos::new(8, 7),
                Pos::new(8, 8),
            ]
        );
    }

    #[test]
    fn test_corner_stone_clipped() {
        let mut board = Board::new();
        board.place_stone(Pos::new(0, 0), Stone::White);

        let moves = candidates(&board, 2);
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|p| p.row <= 2 && p.col <= 2));
    }

    #[test]
    fn test_overlapping_neighborhoods_deduplicated() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(7, 8), Stone::White);

        let moves = candidates(&board, 1);
        // 3x4 block minus the two stones
        assert_eq!(moves.len(), 10);
        let mut sorted = moves.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted, moves);
    }

    #[test]
    fn test_never_empty_on_nearly_full_board() {
        let mut board = Board::new();
        for idx in 0..TOTAL_CELLS - 1 {
            let stone = if idx % 2 == 0 { Stone::Black } else { Stone::White };
            board.place_stone(Pos::from_index(idx), stone);
        }

        let last = Pos::new(BOARD_SIZE as u8 - 1, BOARD_SIZE as u8 - 1);
        assert_eq!(candidates(&board, 1), vec![last]);
    }
}
