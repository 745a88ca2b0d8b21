//! Cross-Level Propagation Tests.
//!
//! Verifies the three flows that cross level boundaries: refill on miss,
//! dirty propagation from a dirty refill source, and back-invalidation of
//! accessor-side copies when a block leaves a store-side level.
//!
//! Two fixed chains, all FIFO for determinism:
//! - "deep L2":    L1 64 B/16 B/4-way (1 set), L2 256 B/16 B/4-way (4 sets)
//! - "shallow L2": L1 64 B/16 B/4-way (1 set), L2  64 B/16 B/2-way (2 sets)
//!
//! L1 tag = addr/16. Shallow L2: set = (addr/16) % 2, tag = addr/32.

use cachesim_core::common::{BlockAddr, Operation};
use cachesim_core::config::{EvictionPolicy, HierarchyConfig, LevelConfig, WritePolicy};
use cachesim_core::hierarchy::CacheHierarchy;
use cachesim_core::report::{CacheEvent, EventLog, NullSink};
use pretty_assertions::assert_eq;

fn level(name: &str, size: u64, ways: u64) -> LevelConfig {
    LevelConfig {
        name: name.to_string(),
        size_bytes: size,
        block_bytes: 16,
        ways,
        policy: EvictionPolicy::Fifo,
        write_policy: WritePolicy::WriteBack,
    }
}

fn deep_l2() -> CacheHierarchy {
    CacheHierarchy::new(&HierarchyConfig {
        levels: vec![level("L1", 64, 4), level("L2", 256, 4)],
    })
    .unwrap()
}

fn shallow_l2() -> CacheHierarchy {
    CacheHierarchy::new(&HierarchyConfig {
        levels: vec![level("L1", 64, 4), level("L2", 64, 2)],
    })
    .unwrap()
}

fn miss(l: &str, address: u64) -> CacheEvent {
    CacheEvent::Miss {
        level: l.to_string(),
        address,
    }
}

fn hit(l: &str, address: u64) -> CacheEvent {
    CacheEvent::Hit {
        level: l.to_string(),
        address,
    }
}

fn eviction(l: &str, block: u64) -> CacheEvent {
    CacheEvent::Eviction {
        level: l.to_string(),
        block: BlockAddr(block),
    }
}

fn writeback(l: &str, block: u64) -> CacheEvent {
    CacheEvent::Writeback {
        level: l.to_string(),
        block: BlockAddr(block),
    }
}

// ══════════════════════════════════════════════════════════
// 1. Refill
// ══════════════════════════════════════════════════════════

/// A top-level miss recurses toward the store: every level misses once and
/// every level ends up holding the block.
#[test]
fn miss_fills_every_level() {
    let mut h = deep_l2();
    let mut log = EventLog::new();

    h.access(Operation::Read, 0, &mut log);

    assert_eq!(log.events, vec![miss("L1", 0), miss("L2", 0)]);
    assert!(h.level(0).contains(0));
    assert!(h.level(1).contains(0));
}

/// A top-level hit resolves locally: the store-side level sees nothing.
#[test]
fn hit_at_top_does_not_touch_store_side() {
    let mut h = deep_l2();
    let mut log = EventLog::new();

    h.access(Operation::Read, 0, &mut log);
    h.access(Operation::Read, 0, &mut log);

    assert_eq!(
        log.events,
        vec![miss("L1", 0), miss("L2", 0), hit("L1", 0)]
    );
}

/// Demand writes dirty only the level they hit; refills propagate the
/// block toward the accessor clean.
#[test]
fn write_dirties_top_level_only() {
    let mut h = deep_l2();

    h.access(Operation::Write, 0, &mut NullSink);

    assert!(h.level(0).is_dirty(0));
    assert!(!h.level(1).is_dirty(0));
}

// ══════════════════════════════════════════════════════════
// 2. Dirty Propagation
// ══════════════════════════════════════════════════════════

/// Refilling from a level whose copy is dirty marks the fresh copy dirty
/// too: the data differs from the backing store no matter which level it
/// came from.
#[test]
fn refill_from_dirty_copy_propagates_dirty_state() {
    let mut h = deep_l2();

    h.access(Operation::Read, 0, &mut NullSink);
    // Drop L1's copy and dirty L2's, as if a sibling accessor had written
    // through a different path.
    h.level_mut(0).invalidate(0, &mut NullSink);
    h.level_mut(1).mark_dirty(0);

    h.access(Operation::Read, 0, &mut NullSink);

    assert!(h.level(0).is_dirty(0));
    assert!(h.level(1).is_dirty(0));
}

/// A dirty eviction writes back into the next level toward the store:
/// that copy turns dirty, and a later refill re-arms the dirty state at
/// the top.
#[test]
fn writeback_dirties_store_side_copy_and_rearms() {
    let mut h = deep_l2();
    let mut sink = NullSink;

    h.access(Operation::Write, 0, &mut sink);
    h.access(Operation::Read, 16, &mut sink);
    h.access(Operation::Read, 32, &mut sink);
    h.access(Operation::Read, 48, &mut sink); // L1's single set is now full

    // Evicts the dirty block 0 from L1; the writeback lands in L2.
    h.access(Operation::Read, 64, &mut sink);

    assert!(!h.level(0).contains(0));
    assert!(h.level(1).contains(0));
    assert!(h.level(1).is_dirty(0));

    // Refetching block 0 pulls the dirty state back up.
    h.access(Operation::Read, 0, &mut sink);

    assert!(h.level(0).is_dirty(0));
}

// ══════════════════════════════════════════════════════════
// 3. Back-Invalidation
// ══════════════════════════════════════════════════════════

/// When a store-side level evicts, the accessor-side copy is purged too —
/// flushing its dirty data first — so a block resident near the accessor
/// is always resident below.
#[test]
fn store_side_eviction_purges_accessor_copy() {
    let mut h = shallow_l2();
    let mut log = EventLog::new();

    h.access(Operation::Write, 0, &mut log); // L1 dirty; L2 set 0 = {0}
    h.access(Operation::Read, 32, &mut log); // L2 set 0 = {0, 32}, full

    // L1 still has room; the refill overflows L2 set 0 and evicts block 0
    // there, which back-invalidates L1's dirty copy.
    h.access(Operation::Read, 64, &mut log);

    assert_eq!(
        log.events,
        vec![
            miss("L1", 0),
            miss("L2", 0),
            miss("L1", 32),
            miss("L2", 32),
            miss("L1", 64),
            miss("L2", 64),
            eviction("L2", 0),
            writeback("L1", 0),
            eviction("L1", 0),
        ]
    );

    assert!(!h.level(0).contains(0));
    assert!(!h.level(1).contains(0));
    assert!(h.level(0).contains(32));
    assert!(h.level(0).contains(64));
}

/// Invalidating at a store-side level cascades: the accessor-side copy is
/// flushed first, its writeback dirties this level, and this level then
/// flushes in turn. No dirty data is silently lost.
#[test]
fn external_invalidate_cascades_writebacks() {
    let mut h = deep_l2();

    h.access(Operation::Write, 0, &mut NullSink);

    let mut log = EventLog::new();
    h.invalidate(1, 0, &mut log);

    assert_eq!(
        log.events,
        vec![
            writeback("L1", 0),
            eviction("L1", 0),
            writeback("L2", 0),
            eviction("L2", 0),
        ]
    );
    assert!(!h.level(0).contains(0));
    assert!(!h.level(1).contains(0));
}

/// Invalidating a block absent from a level produces no downstream side
/// effects at all — absence here guarantees absence accessor-side.
#[test]
fn invalidate_absent_block_has_no_side_effects() {
    let mut h = deep_l2();
    let mut log = EventLog::new();

    h.access(Operation::Read, 0, &mut log);
    log.events.clear();

    h.invalidate(1, 0x1000, &mut log);

    assert!(log.events.is_empty());
    assert!(h.level(0).contains(0));
}

/// After an arbitrary mixed workload, inclusion holds: every block
/// resident at L1 is also resident at L2.
#[test]
fn inclusion_invariant_after_mixed_workload() {
    let mut h = shallow_l2();
    let mut sink = NullSink;

    let workload: [(Operation, u64); 10] = [
        (Operation::Read, 0),
        (Operation::Write, 16),
        (Operation::Read, 32),
        (Operation::Write, 48),
        (Operation::Read, 64),
        (Operation::Read, 80),
        (Operation::Write, 0),
        (Operation::Read, 96),
        (Operation::Read, 16),
        (Operation::Write, 112),
    ];
    for (op, addr) in workload {
        h.access(op, addr, &mut sink);
    }

    for block in (0u64..128).step_by(16) {
        assert!(
            !h.level(0).contains(block) || h.level(1).contains(block),
            "block {block} resident at L1 but missing at L2"
        );
    }
}
