//! Address Decomposition Tests.
//!
//! Verifies the set-index/tag split, block alignment, and the exact
//! inverse reconstruction of block addresses from (tag, set) pairs.
//!
//! The fixed geometry used below: 64 bytes, 16-byte blocks, 2-way
//! set-associative, so num_sets = 64 / (16 * 2) = 2:
//!   set index = (addr / 16) % 2
//!   tag       = addr / 32

use cachesim_core::common::BlockAddr;
use cachesim_core::config::{EvictionPolicy, LevelConfig, WritePolicy};
use cachesim_core::level::CacheLevel;
use proptest::prelude::*;

fn level_config(size: u64, block: u64, ways: u64) -> LevelConfig {
    LevelConfig {
        name: "L1".to_string(),
        size_bytes: size,
        block_bytes: block,
        ways,
        policy: EvictionPolicy::Lru,
        write_policy: WritePolicy::WriteBack,
    }
}

fn small_level() -> CacheLevel {
    CacheLevel::new(&level_config(64, 16, 2)).unwrap()
}

// ══════════════════════════════════════════════════════════
// 1. Set Index and Tag
// ══════════════════════════════════════════════════════════

/// Addresses 0, 16, and 32 land in sets 0, 1, and 0 respectively:
/// consecutive blocks interleave across the two sets.
#[test]
fn set_index_interleaves_consecutive_blocks() {
    let level = small_level();
    let g = level.geometry();

    assert_eq!(g.set_index(0), 0);
    assert_eq!(g.set_index(16), 1);
    assert_eq!(g.set_index(32), 0);
    assert_eq!(g.set_index(48), 1);
}

/// The tag strips block offset and set index: addresses 0 and 32 share
/// set 0 but carry distinct tags.
#[test]
fn tag_distinguishes_blocks_within_a_set() {
    let level = small_level();
    let g = level.geometry();

    assert_eq!(g.tag(0), 0);
    assert_eq!(g.tag(32), 1);
    assert_eq!(g.tag(64), 2);
    // Offsets within a block do not change the tag.
    assert_eq!(g.tag(32 + 15), 1);
}

/// Derived geometry values match the configured parameters.
#[test]
fn derived_geometry_values() {
    let level = small_level();
    let g = level.geometry();

    assert_eq!(g.size_bytes(), 64);
    assert_eq!(g.block_bytes(), 16);
    assert_eq!(g.ways(), 2);
    assert_eq!(g.num_sets(), 2);
}

// ══════════════════════════════════════════════════════════
// 2. Block Alignment
// ══════════════════════════════════════════════════════════

/// Any address aligns down to the start of its 16-byte block.
#[test]
fn block_addr_aligns_down() {
    let level = small_level();
    let g = level.geometry();

    assert_eq!(g.block_addr(0), BlockAddr(0));
    assert_eq!(g.block_addr(15), BlockAddr(0));
    assert_eq!(g.block_addr(16), BlockAddr(16));
    assert_eq!(g.block_addr(19), BlockAddr(16));
    assert_eq!(g.block_addr(47), BlockAddr(32));
}

// ══════════════════════════════════════════════════════════
// 3. Reconstruction
// ══════════════════════════════════════════════════════════

/// (tag, set) reconstruction produces the block-aligned address the pair
/// was decomposed from.
#[test]
fn block_addr_of_reconstructs() {
    let level = small_level();
    let g = level.geometry();

    assert_eq!(g.block_addr_of(0, 0), BlockAddr(0));
    assert_eq!(g.block_addr_of(0, 1), BlockAddr(16));
    assert_eq!(g.block_addr_of(1, 0), BlockAddr(32));
    assert_eq!(g.block_addr_of(1, 1), BlockAddr(48));
    assert_eq!(g.block_addr_of(2, 0), BlockAddr(64));
}

// ══════════════════════════════════════════════════════════
// 4. Round-Trip Property
// ══════════════════════════════════════════════════════════

proptest! {
    /// For every address and a spread of geometries,
    /// `block_addr_of(tag(a), set_index(a)) == block_addr(a)`.
    #[test]
    fn block_address_round_trips(
        addr in 0u64..u64::from(u32::MAX),
        block in prop::sample::select(vec![16u64, 32, 64, 128]),
        ways in prop::sample::select(vec![1u64, 2, 4, 8]),
        sets in prop::sample::select(vec![1u64, 2, 4, 16]),
    ) {
        let config = level_config(block * ways * sets, block, ways);
        let level = CacheLevel::new(&config).unwrap();
        let g = level.geometry();

        prop_assert_eq!(g.block_addr_of(g.tag(addr), g.set_index(addr)), g.block_addr(addr));
    }
}
