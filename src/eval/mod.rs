//! Evaluation module for Gomoku positions
//!
//! This module provides pattern recognition and scoring for board positions.
//! The evaluation considers:
//! - Line patterns (twos, threes, fours, fives)
//! - Open versus closed run ends
//! - A single tunable weight table

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate, evaluate_with, scan_patterns};
pub use patterns::{PatternCounts, PatternKind, PatternWeights};
