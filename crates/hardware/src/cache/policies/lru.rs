//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the cache line that has not been accessed for the longest time.
//! Recency is the `last_used` logical timestamp stored in each line, so the policy
//! itself carries no per-set state.
//!
//! Victim selection runs in two phases:
//! 1. **Fill:** If any way is invalid, the lowest-indexed invalid way is chosen.
//! 2. **Evict:** Otherwise the way with the smallest `last_used` is chosen; ties go
//!    to the lowest index.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()`: O(1)
//!   - `select_victim()`: O(W) where W is the number of ways (associativity)
//! - **Space Complexity:** one timestamp per line
//! - **Worst Case:** Cyclic access to W+1 blocks of one set misses every time (thrashing)

use super::ReplacementPolicy;
use crate::cache::store::CacheLine;

/// LRU Policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LruPolicy;

impl LruPolicy {
    /// Creates a new LRU policy instance.
    pub const fn new() -> Self {
        Self
    }
}

impl ReplacementPolicy for LruPolicy {
    fn name(&self) -> &'static str {
        "lru"
    }

    /// Identifies the victim way to fill.
    ///
    /// An empty `set` yields way 0, which [`CacheStore`](crate::cache::CacheStore)
    /// rejects as out of range.
    fn select_victim(&self, set: &[CacheLine], _now: u64) -> usize {
        if let Some(way) = set.iter().position(|line| !line.valid) {
            return way;
        }
        // `min_by_key` keeps the first of equal minima.
        set.iter()
            .enumerate()
            .min_by_key(|(_, line)| line.last_used)
            .map_or(0, |(way, _)| way)
    }
}
