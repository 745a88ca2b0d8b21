//! Per-set resident state.

use crate::common::addr::BlockAddr;

/// A resident block within a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Way {
    /// Tag identifying the block within this set.
    pub tag: u64,
    /// Block-aligned address the way was filled from.
    pub block: BlockAddr,
    /// Set when the local copy differs from the backing store.
    pub dirty: bool,
}

/// One associativity set.
///
/// `ways` is order-significant: front = oldest arrival / least recent,
/// back = newest arrival / most recent. FIFO and LRU victims come from the
/// front, MRU victims from the back; an LRU hit moves its way to the back.
/// Associativity is small, so linear scans beat any index structure here.
#[derive(Debug, Clone, Default)]
pub(crate) struct CacheSet {
    ways: Vec<Way>,
}

impl CacheSet {
    /// Number of resident ways.
    pub fn len(&self) -> usize {
        self.ways.len()
    }

    /// Position of a resident tag in arrival/recency order, if any.
    pub fn position(&self, tag: u64) -> Option<usize> {
        self.ways.iter().position(|w| w.tag == tag)
    }

    /// Whether a tag is resident.
    pub fn contains(&self, tag: u64) -> bool {
        self.position(tag).is_some()
    }

    /// Whether a resident tag is dirty. False for absent tags.
    pub fn is_dirty(&self, tag: u64) -> bool {
        self.position(tag).is_some_and(|i| self.ways[i].dirty)
    }

    /// Moves a resident tag to the most-recent end. No-op if absent.
    pub fn touch(&mut self, tag: u64) {
        if let Some(i) = self.position(tag) {
            let way = self.ways.remove(i);
            self.ways.push(way);
        }
    }

    /// Marks a resident tag dirty. No-op if absent.
    pub fn mark_dirty(&mut self, tag: u64) {
        if let Some(i) = self.position(tag) {
            self.ways[i].dirty = true;
        }
    }

    /// Installs a block at the newest-arrival position.
    pub fn insert(&mut self, tag: u64, block: BlockAddr, dirty: bool) {
        debug_assert!(!self.contains(tag), "tag inserted twice");
        self.ways.push(Way { tag, block, dirty });
    }

    /// Removes a resident tag, returning its way state.
    pub fn remove(&mut self, tag: u64) -> Option<Way> {
        self.position(tag).map(|i| self.ways.remove(i))
    }

    /// Oldest / least-recent resident way.
    pub fn front(&self) -> Option<&Way> {
        self.ways.first()
    }

    /// Newest / most-recent resident way.
    pub fn back(&self) -> Option<&Way> {
        self.ways.last()
    }
}
