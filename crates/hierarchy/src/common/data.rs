//! Access operation kinds.
//!
//! This module defines the classification of cache accesses. The kind
//! determines the following:
//! 1. **Dirty state:** Writes mark the touched block dirty.
//! 2. **Recency:** Reads and writes refresh LRU recency on a hit; refills never do.
//! 3. **Trace format:** Each kind maps to a single-letter trace code.

/// Kind of cache access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Demand read (`R`).
    ///
    /// Issued by the accessing agent. Refreshes recency on a hit.
    Read,

    /// Demand write (`W`).
    ///
    /// Issued by the accessing agent. Refreshes recency on a hit and marks
    /// the block dirty; the data is flushed only on eviction or invalidation.
    Write,

    /// Block refill (`B`).
    ///
    /// Issued internally when a miss pulls a block in from the next level
    /// toward the backing store. Deliberately leaves eviction-policy
    /// ordering untouched so that propagation does not masquerade as reuse.
    Refill,
}

impl Operation {
    /// Parses a single-letter trace code (`R`, `W`, or `B`, case-insensitive).
    ///
    /// Returns `None` for any other character.
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'R' => Some(Self::Read),
            'W' => Some(Self::Write),
            'B' => Some(Self::Refill),
            _ => None,
        }
    }

    /// Whether a hit with this operation refreshes recency state.
    pub fn refreshes_recency(self) -> bool {
        matches!(self, Self::Read | Self::Write)
    }

    /// Whether this operation marks the accessed block dirty.
    pub fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}
