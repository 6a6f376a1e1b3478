//! Line pattern classification and the weight table
//!
//! A pattern is a maximal run of one side's stones inside a single line,
//! described by its length and how many of its two ends touch an empty cell.

use serde::{Deserialize, Serialize};

/// Classified run of stones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatternKind {
    /// Five or more in a row - the game is won
    Five,
    /// `_OOOO_`
    OpenFour,
    /// `XOOOO_` or `_OOOOX` (the board edge counts as X)
    ClosedFour,
    /// `_OOO_`
    OpenThree,
    /// `XOOO_` or `_OOOX`
    ClosedThree,
    /// `_OO_`
    OpenTwo,
    /// `XOO_` or `_OOX`
    ClosedTwo,
}

impl PatternKind {
    pub const ALL: [PatternKind; 7] = [
        PatternKind::Five,
        PatternKind::OpenFour,
        PatternKind::ClosedFour,
        PatternKind::OpenThree,
        PatternKind::ClosedThree,
        PatternKind::OpenTwo,
        PatternKind::ClosedTwo,
    ];

    /// Classify a run by its length and number of open ends (0-2).
    ///
    /// Singles and fully blocked runs shorter than five carry no pattern.
    #[inline]
    pub fn classify(len: usize, open_ends: u8) -> Option<PatternKind> {
        match (len.min(5), open_ends) {
            (5, _) => Some(PatternKind::Five),
            (4, 2) => Some(PatternKind::OpenFour),
            (4, 1) => Some(PatternKind::ClosedFour),
            (3, 2) => Some(PatternKind::OpenThree),
            (3, 1) => Some(PatternKind::ClosedThree),
            (2, 2) => Some(PatternKind::OpenTwo),
            (2, 1) => Some(PatternKind::ClosedTwo),
            _ => None,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Pattern weights for evaluation
///
/// `five` doubles as the win magnitude: a board holding a five evaluates to
/// exactly `+five` or `-five`, and every other score stays strictly inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternWeights {
    pub five: i32,
    pub open_four: i32,
    pub closed_four: i32,
    pub open_three: i32,
    pub closed_three: i32,
    pub open_two: i32,
    pub closed_two: i32,
}

impl PatternWeights {
    pub const DEFAULT: PatternWeights = PatternWeights {
        five: 1_000_000,
        open_four: 10_000,
        closed_four: 5_000,
        open_three: 1_000,
        closed_three: 500,
        open_two: 100,
        closed_two: 50,
    };

    #[inline]
    pub fn weight(&self, kind: PatternKind) -> i32 {
        match kind {
            PatternKind::Five => self.five,
            PatternKind::OpenFour => self.open_four,
            PatternKind::ClosedFour => self.closed_four,
            PatternKind::OpenThree => self.open_three,
            PatternKind::ClosedThree => self.closed_three,
            PatternKind::OpenTwo => self.open_two,
            PatternKind::ClosedTwo => self.closed_two,
        }
    }

    /// Weighted sum of everything except fives, saturating below `five`.
    pub fn score(&self, counts: &PatternCounts) -> i32 {
        let ceiling = self.five.saturating_sub(1);
        PatternKind::ALL[1..]
            .iter()
            .fold(0i32, |acc, &kind| {
                let n = i32::try_from(counts.get(kind)).unwrap_or(i32::MAX);
                acc.saturating_add(self.weight(kind).saturating_mul(n))
            })
            .min(ceiling)
    }
}

impl Default for PatternWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Number of runs of each kind found for one side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternCounts {
    counts: [u32; 7],
}

impl PatternCounts {
    #[inline]
    pub fn add(&mut self, kind: PatternKind) {
        self.counts[kind.index()] += 1;
    }

    #[inline]
    pub fn get(&self, kind: PatternKind) -> u32 {
        self.counts[kind.index()]
    }

    #[inline]
    pub fn has_five(&self) -> bool {
        self.get(PatternKind::Five) > 0
    }

    /// Total classified runs
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_score_hierarchy() {
        let w = PatternWeights::DEFAULT;
        assert!(w.five > w.open_four);
        assert!(w.open_four > w.closed_four);
        assert!(w.closed_four > w.open_three);
        assert!(w.open_three > w.closed_three);
        assert!(w.closed_three > w.open_two);
        assert!(w.open_two > w.closed_two);
        assert!(w.closed_two > 0);
    }

    #[test]
    fn test_classify() {
        assert_eq!(PatternKind::classify(5, 0), Some(PatternKind::Five));
        assert_eq!(PatternKind::classify(7, 2), Some(PatternKind::Five));
        assert_eq!(PatternKind::classify(4, 2), Some(PatternKind::OpenFour));
        assert_eq!(PatternKind::classify(4, 1), Some(PatternKind::ClosedFour));
        assert_eq!(PatternKind::classify(3, 2), Some(PatternKind::OpenThree));
        assert_eq!(PatternKind::classify(2, 1), Some(PatternKind::ClosedTwo));
    }

    #[test]
    fn test_classify_dead_and_single() {
        assert_eq!(PatternKind::classify(4, 0), None);
        assert_eq!(PatternKind::classify(2, 0), None);
        assert_eq!(PatternKind::classify(1, 2), None);
        assert_eq!(PatternKind::classify(1, 1), None);
    }

    #[test]
    fn test_score_sums_weights() {
        let w = PatternWeights::DEFAULT;
        let mut counts = PatternCounts::default();
        counts.add(PatternKind::OpenThree);
        counts.add(PatternKind::OpenTwo);
        counts.add(PatternKind::OpenTwo);
        assert_eq!(w.score(&counts), 1_000 + 2 * 100);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_score_ignores_five_and_saturates() {
        let w = PatternWeights::DEFAULT;
        let mut counts = PatternCounts::default();
        counts.add(PatternKind::Five);
        assert_eq!(w.score(&counts), 0);
        assert!(counts.has_five());

        for _ in 0..200 {
            counts.add(PatternKind::OpenFour);
        }
        assert_eq!(w.score(&counts), w.five - 1);
    }
}
