//! Transposition Table for caching exact search scores
//!
//! The table only ever holds exact node values (scores that landed strictly
//! inside the node's window, or came from an unpruned search) and hands them
//! back only for the same remaining depth. A hit therefore returns exactly
//! the score re-searching the subtree would produce, and enabling the table
//! never changes the chosen move or its score.
//!
//! # Example
//!
//! ```
//! use gomoku::search::TranspositionTable;
//!
//! let mut tt = TranspositionTable::new(1); // 1 MB
//!
//! let hash = 0x1234_5678_9ABC_DEF0;
//! tt.store(hash, 3, 150);
//!
//! assert_eq!(tt.probe(hash, 3), Some(150));
//! assert_eq!(tt.probe(hash, 2), None);
//! ```

/// Largest table size accepted, in megabytes
pub const MAX_TT_SIZE_MB: usize = 4096;

/// Transposition table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// Zobrist hash of the position
    pub hash: u64,
    /// Remaining search depth the score was computed with
    pub depth: u8,
    /// Exact negamax score from the side to move
    pub score: i32,
}

/// Transposition table for caching search results.
///
/// Uses a simple direct-mapped approach where each hash maps to exactly
/// one slot. Collisions are handled by a depth-preferred replacement policy.
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    size: usize,
    probes: u64,
    hits: u64,
}

impl TranspositionTable {
    /// Create a new transposition table with the given size in megabytes,
    /// clamped to [`MAX_TT_SIZE_MB`].
    ///
    /// ```
    /// use gomoku::search::TranspositionTable;
    ///
    /// let tt = TranspositionTable::new(16); // 16 MB table
    /// assert_eq!(tt.stats().used, 0);
    /// ```
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry>>();
        let size = (size_mb.min(MAX_TT_SIZE_MB) * 1024 * 1024) / entry_size;

        // Ensure at least some entries
        let size = size.max(1024);

        Self {
            entries: vec![None; size],
            size,
            probes: 0,
            hits: 0,
        }
    }

    #[inline]
    fn slot(&self, hash: u64) -> usize {
        (hash % self.size as u64) as usize
    }

    /// Look up the exact score stored for `hash` at exactly `depth`.
    ///
    /// Entries computed at any other depth are ignored.
    #[must_use]
    pub fn probe(&mut self, hash: u64, depth: u8) -> Option<i32> {
        self.probes += 1;
        let entry = self.entries[self.slot(hash)]?;
        if entry.hash != hash || entry.depth != depth {
            return None;
        }
        self.hits += 1;
        Some(entry.score)
    }

    /// Store an exact score.
    ///
    /// Replaces the slot if it is empty, holds the same position, or the new
    /// search is at least as deep as the existing entry.
    pub fn store(&mut self, hash: u64, depth: u8, score: i32) {
        let idx = self.slot(hash);

        let should_replace = match &self.entries[idx] {
            None => true,
            Some(e) => e.hash == hash || e.depth <= depth,
        };

        if should_replace {
            self.entries[idx] = Some(TTEntry { hash, depth, score });
        }
    }

    /// Clear all entries in the table.
    ///
    /// This should be called when starting a new game.
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.probes = 0;
        self.hits = 0;
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> TTStats {
        let used = self.entries.iter().filter(|e| e.is_some()).count();
        TTStats {
            size: self.size,
            used,
            usage_percent: (used as f64 / self.size as f64 * 100.0) as u8,
            probes: self.probes,
            hits: self.hits,
        }
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    /// Total number of slots in the table
    pub size: usize,
    /// Number of slots currently occupied
    pub used: usize,
    /// Percentage of table in use (0-100)
    pub usage_percent: u8,
    /// Lookups since the last clear
    pub probes: u64,
    /// Lookups that returned a score
    pub hits: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: u64 = 0x1234_5678_9ABC_DEF0;

    #[test]
    fn test_tt_store_probe_exact() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 3, 100);
        assert_eq!(tt.probe(HASH, 3), Some(100));
    }

    #[test]
    fn test_tt_requires_identical_depth() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 3, 100);

        assert_eq!(tt.probe(HASH, 2), None);
        assert_eq!(tt.probe(HASH, 4), None);
    }

    #[test]
    fn test_tt_hash_mismatch() {
        let mut tt = TranspositionTable::new(1);
        let size = tt.stats().size as u64;
        tt.store(HASH, 3, 100);

        // Same slot, different position
        assert_eq!(tt.probe(HASH + size, 3), None);
        assert_eq!(tt.probe(!HASH, 3), None);
    }

    #[test]
    fn test_tt_replacement_deeper() {
        let mut tt = TranspositionTable::new(1);
        let size = tt.stats().size as u64;
        let other = HASH + size;

        tt.store(HASH, 2, 100);
        tt.store(other, 3, 200);
        assert_eq!(tt.probe(other, 3), Some(200));
        assert_eq!(tt.probe(HASH, 2), None);
    }

    #[test]
    fn test_tt_no_replacement_shallower() {
        let mut tt = TranspositionTable::new(1);
        let size = tt.stats().size as u64;
        let other = HASH + size;

        tt.store(HASH, 4, 100);
        tt.store(other, 1, 200);
        assert_eq!(tt.probe(HASH, 4), Some(100));
        assert_eq!(tt.probe(other, 1), None);
    }

    #[test]
    fn test_tt_same_position_always_replaced() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 4, 100);
        tt.store(HASH, 2, -30);

        assert_eq!(tt.probe(HASH, 4), None);
        assert_eq!(tt.probe(HASH, 2), Some(-30));
    }

    #[test]
    fn test_tt_clear() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 3, 100);
        tt.clear();

        assert_eq!(tt.probe(HASH, 3), None);
        assert_eq!(tt.stats().used, 0);
    }

    #[test]
    fn test_tt_stats() {
        let mut tt = TranspositionTable::new(1);
        assert_eq!(tt.stats().used, 0);
        assert_eq!(tt.stats().usage_percent, 0);

        tt.store(0x111, 2, 100);
        tt.store(0x222, 2, 100);
        let _ = tt.probe(0x111, 2);
        let _ = tt.probe(0x333, 2);

        let stats = tt.stats();
        assert_eq!(stats.used, 2);
        assert_eq!(stats.probes, 2);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn test_tt_minimum_size() {
        let tt = TranspositionTable::new(0);
        assert!(tt.size >= 1024);
    }
}
