//! Configuration and trace error types.
//!
//! Two error families cross the library boundary:
//! 1. **[`ConfigError`]:** Invalid geometry, rejected at construction time.
//! 2. **[`TraceError`]:** Malformed access traces, raised while parsing.
//!
//! Internal consistency violations (a dirty way with no resident entry, a
//! set holding more ways than the associativity allows) can only arise from
//! an implementation defect and are covered by debug assertions, not
//! recoverable errors.

use thiserror::Error;

/// Errors raised while validating a cache level or hierarchy configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The capacity does not divide evenly into sets.
    ///
    /// `size_bytes` must be an exact multiple of `block_bytes * ways`;
    /// silently truncating to a smaller set count is never acceptable.
    #[error(
        "level `{level}`: size {size_bytes} is not a multiple of block_bytes * ways ({block_bytes} * {ways})"
    )]
    IndivisibleGeometry {
        /// Name of the offending level.
        level: String,
        /// Configured capacity in bytes.
        size_bytes: u64,
        /// Configured block size in bytes.
        block_bytes: u64,
        /// Configured associativity.
        ways: u64,
    },

    /// A geometry parameter was zero.
    #[error("level `{level}`: `{field}` must be greater than zero")]
    ZeroParameter {
        /// Name of the offending level.
        level: String,
        /// Name of the zero field.
        field: &'static str,
    },

    /// The hierarchy was configured with no levels at all.
    #[error("hierarchy must contain at least one level")]
    EmptyHierarchy,

    /// Two levels share a name; reports are keyed by name.
    #[error("duplicate level name `{level}`")]
    DuplicateLevel {
        /// The repeated name.
        level: String,
    },
}

/// Errors raised while reading an access trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// An operation code outside `{R, W, B}`.
    #[error("line {line}: invalid operation `{code}` (expected R, W, or B)")]
    InvalidOperation {
        /// 1-based line number.
        line: usize,
        /// The offending operation field.
        code: String,
    },

    /// An address field that is neither decimal nor `0x`-prefixed hex.
    #[error("line {line}: invalid address `{address}`")]
    InvalidAddress {
        /// 1-based line number.
        line: usize,
        /// The offending address field.
        address: String,
    },

    /// A line that does not split into `<operation> <address>`.
    #[error("line {line}: expected `<operation> <address>`")]
    Malformed {
        /// 1-based line number.
        line: usize,
    },

    /// The trace could not be read.
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),
}
