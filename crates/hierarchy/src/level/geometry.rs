//! Address decomposition for a set-associative level.
//!
//! Every address splits into a set index (which set the block competes in),
//! a tag (which block it is within that set), and a block-aligned address.
//! Decomposition is a pure function of the geometry and is exactly
//! invertible: `block_addr_of(tag(a), set_index(a)) == block_addr(a)` for
//! every address.

use crate::common::addr::BlockAddr;

/// Fixed geometry of one cache level.
///
/// Invariant: `size_bytes == num_sets * block_bytes * ways`. Construction
/// goes through a validated [`LevelConfig`](crate::config::LevelConfig), so
/// the division below is always exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    size_bytes: u64,
    block_bytes: u64,
    ways: u64,
    num_sets: u64,
}

impl Geometry {
    /// Builds a geometry from already-validated parameters.
    pub(crate) fn new(size_bytes: u64, block_bytes: u64, ways: u64) -> Self {
        debug_assert!(block_bytes > 0 && ways > 0);
        debug_assert_eq!(size_bytes % (block_bytes * ways), 0);
        Self {
            size_bytes,
            block_bytes,
            ways,
            num_sets: size_bytes / (block_bytes * ways),
        }
    }

    /// Total capacity in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Block size in bytes.
    pub fn block_bytes(&self) -> u64 {
        self.block_bytes
    }

    /// Associativity (ways per set).
    pub fn ways(&self) -> u64 {
        self.ways
    }

    /// Number of sets.
    pub fn num_sets(&self) -> u64 {
        self.num_sets
    }

    /// Set index selected by an address.
    #[inline]
    pub fn set_index(&self, address: u64) -> usize {
        ((address / self.block_bytes) % self.num_sets) as usize
    }

    /// Tag identifying a block within its set.
    #[inline]
    pub fn tag(&self, address: u64) -> u64 {
        address / (self.block_bytes * self.num_sets)
    }

    /// The address aligned down to its block boundary.
    #[inline]
    pub fn block_addr(&self, address: u64) -> BlockAddr {
        BlockAddr(address - address % self.block_bytes)
    }

    /// Reconstructs the block-aligned address of a `(tag, set)` pair.
    #[inline]
    pub fn block_addr_of(&self, tag: u64, set_index: usize) -> BlockAddr {
        BlockAddr((tag * self.num_sets + set_index as u64) * self.block_bytes)
    }
}
