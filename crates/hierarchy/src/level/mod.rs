//! Set-Associative Cache Level.
//!
//! This module implements a single write-back cache level. It handles
//! address decomposition into set/tag, hit/miss resolution, victim
//! selection under FIFO/LRU/MRU, and the local half of invalidation.
//! A level is self-contained: it holds no references to its neighbors —
//! cross-level refill and invalidation recursion live in
//! [`CacheHierarchy`](crate::hierarchy::CacheHierarchy).
//!
//! Per block and level, the state machine is:
//! Invalid → Clean (fill) → Dirty (write) → Clean (writeback) → Invalid
//! (evict/invalidate). Dirty state is always flushed — and reported —
//! before a block becomes invalid.

/// Address decomposition (set index, tag, block alignment).
pub mod geometry;

mod set;

use tracing::{debug, trace};

use self::geometry::Geometry;
use self::set::CacheSet;
use crate::common::addr::BlockAddr;
use crate::common::data::Operation;
use crate::common::error::ConfigError;
use crate::config::{EvictionPolicy, LevelConfig, WritePolicy};
use crate::report::EventSink;

/// Outcome of a single access at one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessOutcome {
    /// Whether the block was resident.
    pub hit: bool,
    /// Victim displaced when a miss filled an already-full set.
    pub victim: Option<Victim>,
}

/// A block removed by eviction or invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Victim {
    /// Block-aligned address of the removed block.
    pub block: BlockAddr,
    /// Whether the copy was dirty and a writeback was reported.
    pub wrote_back: bool,
}

/// A single set-associative, write-back cache level.
///
/// Constructed once with fixed geometry and policy; per-set state mutates
/// across the access stream. All observable effects (hits, misses,
/// evictions, writebacks) are reported through the [`EventSink`] passed
/// into each operation — the level keeps no counters of its own.
#[derive(Debug, Clone)]
pub struct CacheLevel {
    name: String,
    geometry: Geometry,
    policy: EvictionPolicy,
    write_policy: WritePolicy,
    sets: Vec<CacheSet>,
}

impl CacheLevel {
    /// Constructs a level from a configuration.
    ///
    /// # Errors
    ///
    /// Rejects zero parameters and a capacity that is not an exact
    /// multiple of `block_bytes * ways` — geometry is never truncated.
    pub fn new(config: &LevelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let geometry = Geometry::new(config.size_bytes, config.block_bytes, config.ways);
        let num_sets = geometry.num_sets() as usize;
        Ok(Self {
            name: config.name.clone(),
            geometry,
            policy: config.policy,
            write_policy: config.write_policy,
            sets: vec![CacheSet::default(); num_sets],
        })
    }

    /// Level identifier used in reports.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Address decomposition for this level.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Eviction policy.
    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    /// Write policy (always write-back).
    pub fn write_policy(&self) -> WritePolicy {
        self.write_policy
    }

    /// Whether the block containing `address` is resident.
    pub fn contains(&self, address: u64) -> bool {
        self.sets[self.geometry.set_index(address)].contains(self.geometry.tag(address))
    }

    /// Whether the block containing `address` is resident and dirty.
    ///
    /// Side-effect free; `false` when the block is absent.
    pub fn is_dirty(&self, address: u64) -> bool {
        self.sets[self.geometry.set_index(address)].is_dirty(self.geometry.tag(address))
    }

    /// Number of resident blocks in a set.
    ///
    /// Never exceeds the associativity once an access completes.
    ///
    /// # Panics
    ///
    /// If `set_index >= num_sets`.
    pub fn set_len(&self, set_index: usize) -> usize {
        self.sets[set_index].len()
    }

    /// Marks the block containing `address` dirty, if resident.
    ///
    /// Used by the hierarchy when a refill source or a writeback leaves
    /// this level's copy newer than the backing store.
    pub fn mark_dirty(&mut self, address: u64) {
        let set_index = self.geometry.set_index(address);
        let tag = self.geometry.tag(address);
        self.sets[set_index].mark_dirty(tag);
    }

    /// Performs one access against this level.
    ///
    /// On a hit the access is reported, LRU recency is refreshed (reads and
    /// writes only — refills never reorder), and a write marks the block
    /// dirty. On a miss the access is reported, a victim is evicted first
    /// if the set is at capacity, and the block is installed at the
    /// newest-arrival position (dirty when writing).
    ///
    /// The returned outcome tells the caller whether a refill from the next
    /// level is needed (`!hit`) and which block, if any, was displaced.
    pub fn access(
        &mut self,
        operation: Operation,
        address: u64,
        events: &mut dyn EventSink,
    ) -> AccessOutcome {
        let set_index = self.geometry.set_index(address);
        let tag = self.geometry.tag(address);

        if self.sets[set_index].contains(tag) {
            trace!(level = %self.name, address, ?operation, "hit");
            events.report_hit(&self.name, address);
            if self.policy == EvictionPolicy::Lru && operation.refreshes_recency() {
                self.sets[set_index].touch(tag);
            }
            if operation.is_write() {
                self.sets[set_index].mark_dirty(tag);
            }
            return AccessOutcome {
                hit: true,
                victim: None,
            };
        }

        trace!(level = %self.name, address, ?operation, "miss");
        events.report_miss(&self.name, address);

        let victim = if self.sets[set_index].len() as u64 >= self.geometry.ways() {
            self.evict(set_index, events)
        } else {
            None
        };

        let block = self.geometry.block_addr(address);
        self.sets[set_index].insert(tag, block, operation.is_write());

        AccessOutcome { hit: false, victim }
    }

    /// Evicts one victim from a set according to the eviction policy.
    ///
    /// FIFO and LRU take the oldest/least-recent way; MRU takes the
    /// newest. A dirty victim is written back (reported) before removal;
    /// the eviction itself is reported after. Returns `None` for an empty
    /// set — eviction never fails.
    ///
    /// # Panics
    ///
    /// If `set_index >= num_sets`.
    pub fn evict(&mut self, set_index: usize, events: &mut dyn EventSink) -> Option<Victim> {
        let victim = match self.policy {
            EvictionPolicy::Fifo | EvictionPolicy::Lru => self.sets[set_index].front(),
            EvictionPolicy::Mru => self.sets[set_index].back(),
        }?;
        let tag = victim.tag;
        let block = self.geometry.block_addr_of(tag, set_index);
        self.remove(set_index, tag, block, events)
    }

    /// Removes the block containing `block_address` from this level.
    ///
    /// The local half of invalidation: absent blocks are untouched and
    /// nothing is reported; a resident dirty block is written back
    /// (reported) before its removal is reported. Callers that need the
    /// whole chain kept consistent go through
    /// [`CacheHierarchy::invalidate`](crate::hierarchy::CacheHierarchy::invalidate),
    /// which purges accessor-side copies first.
    pub fn invalidate(&mut self, block_address: u64, events: &mut dyn EventSink) -> Option<Victim> {
        let set_index = self.geometry.set_index(block_address);
        let tag = self.geometry.tag(block_address);
        if !self.sets[set_index].contains(tag) {
            return None;
        }
        let block = self.geometry.block_addr(block_address);
        self.remove(set_index, tag, block, events)
    }

    /// Shared removal path: writeback-if-dirty, drop the way, report.
    fn remove(
        &mut self,
        set_index: usize,
        tag: u64,
        block: BlockAddr,
        events: &mut dyn EventSink,
    ) -> Option<Victim> {
        let way = self.sets[set_index].remove(tag)?;
        debug_assert_eq!(way.block, block);

        let wrote_back = way.dirty;
        if wrote_back {
            debug!(level = %self.name, %block, "writeback");
            events.report_writeback(&self.name, block);
        }
        debug!(level = %self.name, %block, "evict");
        events.report_eviction(&self.name, block);

        Some(Victim { block, wrote_back })
    }
}
