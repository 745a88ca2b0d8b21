//! Cache event reporting.
//!
//! Levels report hits, misses, evictions, and writebacks as pure
//! notifications with no return value. Collectors implement [`EventSink`]
//! and live entirely outside the levels: the driver owns the sink and
//! passes it by `&mut dyn` into every operation.

use crate::common::addr::BlockAddr;

/// Receiver for per-level cache events.
pub trait EventSink {
    /// An access found its block resident at `level`.
    fn report_hit(&mut self, level: &str, address: u64);

    /// An access missed at `level`.
    fn report_miss(&mut self, level: &str, address: u64);

    /// A block was removed from `level` (capacity eviction or invalidation).
    fn report_eviction(&mut self, level: &str, block: BlockAddr);

    /// A dirty block was flushed from `level` before removal.
    fn report_writeback(&mut self, level: &str, block: BlockAddr);
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn report_hit(&mut self, _level: &str, _address: u64) {}
    fn report_miss(&mut self, _level: &str, _address: u64) {}
    fn report_eviction(&mut self, _level: &str, _block: BlockAddr) {}
    fn report_writeback(&mut self, _level: &str, _block: BlockAddr) {}
}

/// A single recorded cache event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    /// An access found its block resident.
    Hit {
        /// Reporting level.
        level: String,
        /// Accessed address.
        address: u64,
    },
    /// An access missed.
    Miss {
        /// Reporting level.
        level: String,
        /// Accessed address.
        address: u64,
    },
    /// A block was removed.
    Eviction {
        /// Reporting level.
        level: String,
        /// Removed block.
        block: BlockAddr,
    },
    /// A dirty block was flushed.
    Writeback {
        /// Reporting level.
        level: String,
        /// Flushed block.
        block: BlockAddr,
    },
}

/// Sink that records events in arrival order.
///
/// Useful for asserting on exact event sequences in tests and for
/// debugging propagation across a chain.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    /// Recorded events, oldest first.
    pub events: Vec<CacheEvent>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events reported by one level, in order.
    pub fn for_level(&self, level: &str) -> Vec<&CacheEvent> {
        self.events
            .iter()
            .filter(|e| match e {
                CacheEvent::Hit { level: l, .. }
                | CacheEvent::Miss { level: l, .. }
                | CacheEvent::Eviction { level: l, .. }
                | CacheEvent::Writeback { level: l, .. } => l == level,
            })
            .collect()
    }
}

impl EventSink for EventLog {
    fn report_hit(&mut self, level: &str, address: u64) {
        self.events.push(CacheEvent::Hit {
            level: level.to_string(),
            address,
        });
    }

    fn report_miss(&mut self, level: &str, address: u64) {
        self.events.push(CacheEvent::Miss {
            level: level.to_string(),
            address,
        });
    }

    fn report_eviction(&mut self, level: &str, block: BlockAddr) {
        self.events.push(CacheEvent::Eviction {
            level: level.to_string(),
            block,
        });
    }

    fn report_writeback(&mut self, level: &str, block: BlockAddr) {
        self.events.push(CacheEvent::Writeback {
            level: level.to_string(),
            block,
        });
    }
}
