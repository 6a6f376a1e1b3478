//! Error types for the Gomoku engine
//!
//! Board and session operations report [`GameError`]; loading or validating
//! an [`EngineConfig`](crate::config::EngineConfig) reports [`ConfigError`].
//! The search itself has no recoverable failures.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::board::{Pos, Stone};
use crate::game::Phase;

/// Why a placement was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    /// Coordinates outside the board
    OutOfBounds,
    /// Cell already holds a stone
    Occupied,
    /// `Stone::Empty` was given as the side to place
    NoSide,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            MoveRejection::OutOfBounds => "out of bounds",
            MoveRejection::Occupied => "cell is occupied",
            MoveRejection::NoSide => "no side to place",
        };
        f.write_str(msg)
    }
}

/// Errors raised by board and game-session operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Placement on an occupied or off-board cell
    #[error("invalid move at {pos}: {reason}")]
    InvalidMove { pos: Pos, reason: MoveRejection },

    /// Board is full; the game is a draw
    #[error("no legal move: the board is full")]
    NoLegalMove,

    /// Session action issued in the wrong phase
    #[error("cannot {action} during {phase:?}")]
    IllegalAction { action: &'static str, phase: Phase },

    /// A color choice that is not Black or White
    #[error("{0} is not a playable side")]
    InvalidSide(Stone),

    /// Malformed coordinate text
    #[error("cannot parse position: {0}")]
    ParsePos(String),
}

/// Errors raised while loading or validating engine configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
