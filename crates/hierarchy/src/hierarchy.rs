//! Level chain ownership and cross-level recursion.
//!
//! A [`CacheHierarchy`] owns its levels in an ordered `Vec`; adjacency is
//! positional, so no level holds a reference to another and the chain has
//! no ownership cycles. Three flows cross level boundaries, all resolved
//! synchronously here:
//! 1. **Refill:** A miss pulls the block in from the next level toward the
//!    store with an [`Operation::Refill`] access, recursively.
//! 2. **Dirty propagation:** A refill from a dirty copy marks the freshly
//!    filled copy dirty too — the data differs from the backing store.
//! 3. **Back-invalidation:** A block removed at one level is purged from
//!    every level nearer the accessor, flushing their dirty copies first,
//!    so a resident block near the accessor is always resident below it.

use crate::common::data::Operation;
use crate::common::error::ConfigError;
use crate::config::HierarchyConfig;
use crate::level::CacheLevel;
use crate::report::EventSink;

/// An ordered chain of cache levels.
///
/// Index 0 is nearest the accessing agent; the last index sits just above
/// the backing store. The chain is driven sequentially by one logical
/// accessor: every access resolves to completion, including all refills
/// and invalidations it triggers, before the next begins.
#[derive(Debug)]
pub struct CacheHierarchy {
    levels: Vec<CacheLevel>,
}

impl CacheHierarchy {
    /// Builds a hierarchy from an ordered configuration.
    ///
    /// # Errors
    ///
    /// Rejects an empty chain, duplicate level names, and any per-level
    /// geometry error.
    pub fn new(config: &HierarchyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let levels = config
            .levels
            .iter()
            .map(CacheLevel::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { levels })
    }

    /// Number of levels in the chain.
    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// Borrows a level by index (0 = nearest the accessor).
    ///
    /// # Panics
    ///
    /// If `index >= num_levels`.
    pub fn level(&self, index: usize) -> &CacheLevel {
        &self.levels[index]
    }

    /// Mutably borrows a level by index.
    ///
    /// # Panics
    ///
    /// If `index >= num_levels`.
    pub fn level_mut(&mut self, index: usize) -> &mut CacheLevel {
        &mut self.levels[index]
    }

    /// Drives one access into the top of the hierarchy.
    ///
    /// The sole entry point for the simulated access stream: the access
    /// runs against the level nearest the accessor and recurses toward the
    /// store on each miss.
    pub fn access(&mut self, operation: Operation, address: u64, events: &mut dyn EventSink) {
        self.access_at(0, operation, address, events);
    }

    fn access_at(
        &mut self,
        index: usize,
        operation: Operation,
        address: u64,
        events: &mut dyn EventSink,
    ) {
        let outcome = self.levels[index].access(operation, address, events);

        if let Some(victim) = outcome.victim {
            if victim.wrote_back {
                self.mark_dirty_toward_store(index, victim.block.val());
            }
            // The displaced block may still be resident nearer the accessor.
            if index > 0 {
                self.invalidate_at(index - 1, victim.block.val(), events);
            }
        }

        if !outcome.hit && index + 1 < self.levels.len() {
            self.access_at(index + 1, Operation::Refill, address, events);
            if self.levels[index + 1].is_dirty(address) {
                // Fetched data already differs from the backing store.
                self.levels[index].mark_dirty(address);
            }
        }
    }

    /// Invalidates a block at a level and every level nearer the accessor.
    ///
    /// A block absent at `level_index` is guaranteed absent at every level
    /// nearer the accessor, so the call returns with no side effects.
    /// Otherwise the accessor-side chain is purged first — those copies
    /// hold the freshest dirty data and must report their writebacks before
    /// this level discards its own copy.
    ///
    /// # Panics
    ///
    /// If `level_index >= num_levels`.
    pub fn invalidate(
        &mut self,
        level_index: usize,
        block_address: u64,
        events: &mut dyn EventSink,
    ) {
        self.invalidate_at(level_index, block_address, events);
    }

    fn invalidate_at(&mut self, index: usize, block_address: u64, events: &mut dyn EventSink) {
        if !self.levels[index].contains(block_address) {
            return;
        }
        if index > 0 {
            self.invalidate_at(index - 1, block_address, events);
        }
        if let Some(victim) = self.levels[index].invalidate(block_address, events) {
            if victim.wrote_back {
                self.mark_dirty_toward_store(index, block_address);
            }
        }
    }

    /// A writeback from `index` lands one level toward the store: that
    /// copy, if resident, now differs from the backing store.
    fn mark_dirty_toward_store(&mut self, index: usize, address: u64) {
        if let Some(next) = self.levels.get_mut(index + 1) {
            next.mark_dirty(address);
        }
    }
}
