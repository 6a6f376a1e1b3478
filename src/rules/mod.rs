//! Game rules for standard Gomoku
//!
//! Five or more stones in a row win. There are no captures and no
//! forbidden moves.

pub mod win;

// Re-exports for convenient access
pub use win::{
    check_winner, find_five_positions, has_five_at_pos, has_five_in_row, winning_moves,
};
