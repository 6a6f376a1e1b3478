//! Engine configuration
//!
//! Every field has a default, so a TOML file only needs the keys it changes:
//!
//! ```toml
//! depth = 3
//! parallel = true
//!
//! [weights]
//! open_three = 1200
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::BOARD_SIZE;
use crate::error::ConfigError;
use crate::eval::PatternWeights;
use crate::search::{DEFAULT_RADIUS, MAX_TT_SIZE_MB, SCORE_INF};

/// Deepest search the configuration accepts
pub const MAX_DEPTH: u8 = 10;

/// Tunable engine parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed search depth in plies
    pub depth: u8,
    /// Chebyshev radius of the candidate neighborhood
    pub radius: u8,
    /// Cache exact subtree scores in a transposition table
    pub use_tt: bool,
    /// Transposition table size in megabytes
    pub tt_size_mb: usize,
    /// Search root moves on the rayon thread pool
    pub parallel: bool,
    /// Play immediate wins and block immediate losses without searching.
    ///
    /// With this off, blocking an open four is left to the search. At depth 2
    /// or more every reply to an open four scores as a loss, so the tie-break
    /// picks the first candidate in row-major order instead of an open end.
    pub tactical_shortcuts: bool,
    pub weights: PatternWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            radius: DEFAULT_RADIUS,
            use_tt: true,
            tt_size_mb: 16,
            parallel: false,
            tactical_shortcuts: true,
            weights: PatternWeights::DEFAULT,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Serialize the configuration back to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_DEPTH).contains(&self.depth) {
            return Err(invalid(
                "depth",
                format!("must be between 1 and {MAX_DEPTH}, got {}", self.depth),
            ));
        }

        let max_radius = (BOARD_SIZE - 1) as u8;
        if !(1..=max_radius).contains(&self.radius) {
            return Err(invalid(
                "radius",
                format!("must be between 1 and {max_radius}, got {}", self.radius),
            ));
        }

        if self.use_tt && !(1..=MAX_TT_SIZE_MB).contains(&self.tt_size_mb) {
            return Err(invalid(
                "tt_size_mb",
                format!(
                    "must be between 1 and {MAX_TT_SIZE_MB} when use_tt is enabled, got {}",
                    self.tt_size_mb
                ),
            ));
        }

        self.validate_weights()
    }

    fn validate_weights(&self) -> Result<(), ConfigError> {
        let w = &self.weights;
        let others = [
            ("weights.open_four", w.open_four),
            ("weights.closed_four", w.closed_four),
            ("weights.open_three", w.open_three),
            ("weights.closed_three", w.closed_three),
            ("weights.open_two", w.open_two),
            ("weights.closed_two", w.closed_two),
        ];

        if w.five <= 0 || w.five >= SCORE_INF {
            return Err(invalid(
                "weights.five",
                format!("must be positive and below {SCORE_INF}, got {}", w.five),
            ));
        }

        for (field, value) in others {
            if value < 0 {
                return Err(invalid(field, format!("must not be negative, got {value}")));
            }
            if value >= w.five {
                return Err(invalid(
                    field,
                    format!("must be below weights.five ({}), got {value}", w.five),
                ));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
