//! Simulation statistics collection and reporting.
//!
//! [`HierarchyStats`] is an [`EventSink`] that accumulates per-level
//! counters and prints a summary report. It is wholly external to the
//! levels: the driver owns it and passes it into each access.

use crate::common::addr::BlockAddr;
use crate::report::EventSink;

/// Counters for a single level.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LevelStats {
    /// Accesses satisfied by a resident block.
    pub hits: u64,
    /// Accesses that required a fill.
    pub misses: u64,
    /// Blocks removed (capacity evictions and invalidations).
    pub evictions: u64,
    /// Dirty blocks flushed before removal.
    pub writebacks: u64,
}

impl LevelStats {
    /// Total accesses observed.
    pub fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Hit fraction in percent; zero when no accesses were observed.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Statistics collector for a whole hierarchy.
///
/// Levels appear in first-report order, which for a chain driven from the
/// top is accessor-to-store order.
#[derive(Debug, Default, Clone)]
pub struct HierarchyStats {
    levels: Vec<(String, LevelStats)>,
}

impl HierarchyStats {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters for a level by name, if it has reported anything.
    pub fn level(&self, name: &str) -> Option<&LevelStats> {
        self.levels.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    /// Level names in first-report order.
    pub fn level_names(&self) -> impl Iterator<Item = &str> {
        self.levels.iter().map(|(n, _)| n.as_str())
    }

    fn entry(&mut self, name: &str) -> &mut LevelStats {
        let index = match self.levels.iter().position(|(n, _)| n == name) {
            Some(i) => i,
            None => {
                self.levels.push((name.to_string(), LevelStats::default()));
                self.levels.len() - 1
            }
        };
        &mut self.levels[index].1
    }

    /// Prints the per-level report to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("CACHE HIERARCHY SIMULATION STATISTICS");
        println!("==========================================================");
        for (name, stats) in &self.levels {
            println!(
                "  {:<6} accesses: {:<10} | hits: {:<10} | miss_rate: {:.2}%",
                name,
                stats.accesses(),
                stats.hits,
                100.0 - stats.hit_rate()
            );
            println!(
                "  {:<6} evictions: {:<9} | writebacks: {}",
                "", stats.evictions, stats.writebacks
            );
        }
        println!("==========================================================");
    }
}

impl EventSink for HierarchyStats {
    fn report_hit(&mut self, level: &str, _address: u64) {
        self.entry(level).hits += 1;
    }

    fn report_miss(&mut self, level: &str, _address: u64) {
        self.entry(level).misses += 1;
    }

    fn report_eviction(&mut self, level: &str, _block: BlockAddr) {
        self.entry(level).evictions += 1;
    }

    fn report_writeback(&mut self, level: &str, _block: BlockAddr) {
        self.entry(level).writebacks += 1;
    }
}
