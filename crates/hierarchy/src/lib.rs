//! Multi-level set-associative cache hierarchy simulator.
//!
//! This crate models how reads and writes propagate through a chain of
//! write-back cache levels to a backing store. For a stream of accesses it
//! answers which levels hit, which missed, which blocks were evicted, and
//! when dirty data was written back. The pieces:
//! 1. **Level:** Set-associative geometry, FIFO/LRU/MRU eviction, per-block dirty state.
//! 2. **Hierarchy:** Chain ownership, miss refill, back-invalidation, dirty propagation.
//! 3. **Reporting:** Hit/miss/eviction/writeback event sinks and per-level statistics.
//! 4. **Simulation:** Access trace parsing and the replay loop.
//! 5. **Configuration:** serde-deserializable geometry, validated at construction.

/// Common types (block addresses, operations, errors).
pub mod common;
/// Simulator configuration (defaults, policies, per-level geometry).
pub mod config;
/// Level chain ownership and cross-level recursion.
pub mod hierarchy;
/// The set-associative cache level component.
pub mod level;
/// Cache event reporting trait and sinks.
pub mod report;
/// Trace loading and the simulation run loop.
pub mod sim;
/// Per-level statistics collection and reporting.
pub mod stats;

/// Hierarchy configuration; build in code or deserialize from JSON.
pub use crate::config::HierarchyConfig;
/// Top-level chain type; construct with [`CacheHierarchy::new`].
pub use crate::hierarchy::CacheHierarchy;
/// A single cache level; usable standalone or as part of a chain.
pub use crate::level::CacheLevel;
/// Statistics collector implementing [`report::EventSink`].
pub use crate::stats::HierarchyStats;
