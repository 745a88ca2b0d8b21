//! Unit tests for the hierarchy chain.


/// Refill, dirty propagation, and back-invalidation across levels.
pub mod propagation;
