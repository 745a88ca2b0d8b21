//! Block-aligned address type.
//!
//! A strong type for addresses that have been aligned down to a block
//! boundary, preventing accidental mixing with raw byte addresses. Raw
//! accessed addresses stay `u64`; every eviction, writeback, and
//! invalidation deals in whole blocks and carries a [`BlockAddr`].

use std::fmt;

/// A block-aligned address.
///
/// Produced by a level's geometry (`block_addr` / `block_addr_of`); the
/// wrapped value is always a multiple of the producing level's block size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockAddr(pub u64);

impl BlockAddr {
    /// Creates a new block address from a raw 64-bit value.
    #[inline]
    pub fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline]
    pub fn val(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlockAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
