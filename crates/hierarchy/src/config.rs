//! Configuration system for the cache hierarchy simulator.
//!
//! This module defines the structures and enums used to parameterize a
//! simulation. It provides:
//! 1. **Defaults:** Baseline geometry constants for unspecified fields.
//! 2. **Structures:** Per-level geometry and the ordered hierarchy config.
//! 3. **Enums:** Eviction and write policies.
//!
//! Configuration is supplied as JSON (see [`HierarchyConfig::from_json`]) or
//! built in code; either way it is validated before any level is
//! constructed, so a geometry that does not divide evenly is rejected
//! up front rather than silently truncated.

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values fill in geometry fields left unspecified in a
/// configuration file.
mod defaults {
    /// Default per-level capacity (32 KiB).
    pub const SIZE_BYTES: u64 = 32 * 1024;

    /// Default block size (64 bytes).
    ///
    /// Matches typical modern processor cache line sizes.
    pub const BLOCK_BYTES: u64 = 64;

    /// Default associativity (4 ways per set).
    pub const WAYS: u64 = 4;
}

/// Eviction policy algorithms.
///
/// Specifies how a victim is selected when a new block must be installed
/// in a full cache set. The set's arrival/recency order carries all policy
/// state, so victim selection is a closed, exhaustive choice — there is no
/// "unknown policy" at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EvictionPolicy {
    /// First-In First-Out.
    ///
    /// Evicts the earliest arrival in the set, regardless of hit history.
    #[serde(alias = "Fifo")]
    Fifo,

    /// Least Recently Used.
    ///
    /// Evicts the block untouched for the longest time; reads and writes
    /// refresh recency on a hit.
    #[default]
    #[serde(alias = "Lru")]
    Lru,

    /// Most Recently Used.
    ///
    /// Deliberately evicts the newest entry. Effective for cyclic access
    /// patterns larger than the cache.
    #[serde(alias = "Mru")]
    Mru,
}

/// Write policies.
///
/// Only write-back is modeled: dirty blocks are held locally and flushed
/// to the next level toward the backing store on eviction or invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum WritePolicy {
    /// Deferred writes, flushed on eviction/invalidation.
    #[default]
    #[serde(alias = "WB")]
    WriteBack,
}

/// Geometry and policy for a single cache level.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelConfig {
    /// Identifier used in reports (e.g. `"L1"`).
    pub name: String,

    /// Total capacity in bytes.
    #[serde(default = "LevelConfig::default_size")]
    pub size_bytes: u64,

    /// Block size in bytes.
    #[serde(default = "LevelConfig::default_block")]
    pub block_bytes: u64,

    /// Associativity (ways per set).
    #[serde(default = "LevelConfig::default_ways")]
    pub ways: u64,

    /// Eviction policy.
    #[serde(default)]
    pub policy: EvictionPolicy,

    /// Write policy (write-back only).
    #[serde(default)]
    pub write_policy: WritePolicy,
}

impl LevelConfig {
    /// Returns the default level capacity in bytes.
    fn default_size() -> u64 {
        defaults::SIZE_BYTES
    }

    /// Returns the default block size in bytes.
    fn default_block() -> u64 {
        defaults::BLOCK_BYTES
    }

    /// Returns the default associativity.
    fn default_ways() -> u64 {
        defaults::WAYS
    }

    /// Creates a config with the given name and default geometry.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Validates the geometry.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroParameter`] if any of `size_bytes`, `block_bytes`,
    /// or `ways` is zero; [`ConfigError::IndivisibleGeometry`] if the
    /// capacity does not divide evenly into at least one full set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("size_bytes", self.size_bytes),
            ("block_bytes", self.block_bytes),
            ("ways", self.ways),
        ];
        for (field, value) in fields {
            if value == 0 {
                return Err(ConfigError::ZeroParameter {
                    level: self.name.clone(),
                    field,
                });
            }
        }
        if self.size_bytes % (self.block_bytes * self.ways) != 0 {
            return Err(ConfigError::IndivisibleGeometry {
                level: self.name.clone(),
                size_bytes: self.size_bytes,
                block_bytes: self.block_bytes,
                ways: self.ways,
            });
        }
        Ok(())
    }
}

impl Default for LevelConfig {
    /// A 32 KiB, 64-byte-block, 4-way LRU level named `L1`.
    fn default() -> Self {
        Self {
            name: "L1".to_string(),
            size_bytes: defaults::SIZE_BYTES,
            block_bytes: defaults::BLOCK_BYTES,
            ways: defaults::WAYS,
            policy: EvictionPolicy::default(),
            write_policy: WritePolicy::default(),
        }
    }
}

/// Ordered configuration for a whole hierarchy.
///
/// Index 0 is the level nearest the accessing agent; the last entry sits
/// just above the backing store.
#[derive(Debug, Clone, Deserialize)]
pub struct HierarchyConfig {
    /// Level configurations, ordered from the accessor toward the store.
    pub levels: Vec<LevelConfig>,
}

impl HierarchyConfig {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Any `serde_json` deserialization failure.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Validates every level and the chain as a whole.
    ///
    /// # Errors
    ///
    /// Geometry errors from [`LevelConfig::validate`], plus
    /// [`ConfigError::EmptyHierarchy`] and [`ConfigError::DuplicateLevel`]
    /// for chain-level problems.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::EmptyHierarchy);
        }
        for (i, level) in self.levels.iter().enumerate() {
            level.validate()?;
            if self.levels[..i].iter().any(|l| l.name == level.name) {
                return Err(ConfigError::DuplicateLevel {
                    level: level.name.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Default for HierarchyConfig {
    /// A two-level chain: 32 KiB 4-way L1 over 256 KiB 8-way L2, both LRU.
    fn default() -> Self {
        Self {
            levels: vec![
                LevelConfig::named("L1"),
                LevelConfig {
                    name: "L2".to_string(),
                    size_bytes: 256 * 1024,
                    ways: 8,
                    ..LevelConfig::default()
                },
            ],
        }
    }
}
