//! Trace loading and the simulation run loop.
//!
//! This module connects an access trace to a hierarchy. It provides:
//! 1. **Trace parsing:** Reading `<op> <address>` lines into [`TraceEntry`] values.
//! 2. **Replay:** Feeding a parsed trace to the top of a hierarchy in order.

/// Access trace parsing.
pub mod trace;

use self::trace::TraceEntry;
use crate::hierarchy::CacheHierarchy;
use crate::report::EventSink;

/// Replays a parsed trace against the hierarchy's top level.
///
/// Accesses run strictly in order; each resolves to completion — including
/// any refills and invalidations across the chain — before the next begins.
pub fn run(hierarchy: &mut CacheHierarchy, entries: &[TraceEntry], events: &mut dyn EventSink) {
    for entry in entries {
        hierarchy.access(entry.operation, entry.address, events);
    }
}
