//! Cache Replacement Policies.
//!
//! A policy decides which way of a full set to overwrite on a miss and how a hit
//! updates recency state. Selection never mutates: the simulator writes the chosen
//! way through [`CacheStore::install`], so victim choice can be tested against a
//! hand-built set without driving a trace.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used, timestamp based.

/// Least Recently Used replacement policy.
pub mod lru;

pub use lru::LruPolicy;

use std::fmt;

use super::store::{CacheLine, CacheStore};

/// Trait for cache replacement policies.
///
/// Defines the interface for updating usage state and selecting victim lines.
pub trait ReplacementPolicy: fmt::Debug + Send + Sync {
    /// Short policy name used in logs.
    fn name(&self) -> &'static str;

    /// Updates recency state after a hit on `way` of `set_index`.
    ///
    /// The default stamps the line with `now`, which is all a timestamp-based
    /// policy needs.
    ///
    /// # Arguments
    ///
    /// * `store` - The cache storage.
    /// * `set_index` - The set that hit.
    /// * `way` - The way that hit.
    /// * `now` - Current logical time.
    fn touch(&mut self, store: &mut CacheStore, set_index: usize, way: usize, now: u64) {
        store.touch(set_index, way, now);
    }

    /// Selects the way to fill in a set.
    ///
    /// # Arguments
    ///
    /// * `set` - The lines of the target set, in way order.
    /// * `now` - Current logical time.
    ///
    /// # Returns
    ///
    /// The way index to overwrite, `< set.len()` for any non-empty set.
    fn select_victim(&self, set: &[CacheLine], now: u64) -> usize;
}
