// Copyright (c) 2026-present, hashkit
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Point-in-time statistics of a hash table
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct TableStats {
    /// Number of key-value pairs
    pub len: usize,

    /// Number of buckets (chained) or slots (open addressing)
    pub capacity: usize,

    /// How many times the table has doubled
    pub rehash_count: usize,

    /// Index of the most recently written bucket or slot
    pub last_updated: usize,

    /// Non-empty buckets (chained) or live slots (open addressing)
    pub occupied: usize,

    /// Longest chain, `None` where chains do not exist
    pub max_chain_size: Option<usize>,
}

impl TableStats {
    /// Percentage of buckets or slots that are occupied.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn occupancy_percent(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.occupied as f64 / self.capacity as f64 * 100.0
    }
}

impl std::fmt::Display for TableStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Size: {}", self.len)?;
        writeln!(f, "Capacity: {}", self.capacity)?;
        match self.max_chain_size {
            Some(n) => writeln!(f, "Max chain size: {n}")?,
            None => writeln!(f, "Max chain size: -")?,
        }
        writeln!(f, "Rehashes: {}", self.rehash_count)?;
        writeln!(f, "Last updated: {}", self.last_updated)?;
        write!(
            f,
            "Occupied: {} ({:3.2}%)",
            self.occupied,
            self.occupancy_percent()
        )
    }
}
