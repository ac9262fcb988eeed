//! Simulator: owns the cache for one run and drives the trace through it.
//!
//! Each access performs the same fixed sequence:
//! 1. Decode the address into `(set index, tag)`.
//! 2. Look the tag up in its set.
//! 3. On a hit, let the policy touch the line. On a miss, let the policy pick a
//!    victim and install the tag there.
//! 4. Update the counters and advance the logical clock by one.
//!
//! A run is `Running` while the trace yields addresses and `Finished` afterwards.
//! [`Simulator::run`] and [`Simulator::finish`] consume the simulator, so a
//! finished run cannot be resumed.

use crate::cache::{AddressDecoder, CacheStore, LruPolicy, ReplacementPolicy};
use crate::common::error::ConfigError;
use crate::config::CacheGeometry;
use crate::stats::{CacheStats, Summary};

use super::event::{AccessEvent, EventSink, Outcome};

/// Trace-driven cache simulator.
#[derive(Debug)]
pub struct Simulator {
    geometry: CacheGeometry,
    decoder: AddressDecoder,
    store: CacheStore,
    policy: Box<dyn ReplacementPolicy>,
    clock: u64,
    stats: CacheStats,
}

impl Simulator {
    /// Creates an LRU simulator with every line invalid.
    ///
    /// # Arguments
    ///
    /// * `geometry` - Cache geometry; validated before anything is allocated.
    ///
    /// # Returns
    ///
    /// The simulator, or the [`ConfigError`] describing why the geometry is invalid.
    pub fn new(geometry: CacheGeometry) -> Result<Self, ConfigError> {
        Self::with_policy(geometry, Box::new(LruPolicy::new()))
    }

    /// Creates a simulator with an explicit replacement policy.
    ///
    /// # Arguments
    ///
    /// * `geometry` - Cache geometry; validated before anything is allocated.
    /// * `policy` - Victim selection and hit bookkeeping.
    pub fn with_policy(
        geometry: CacheGeometry,
        policy: Box<dyn ReplacementPolicy>,
    ) -> Result<Self, ConfigError> {
        geometry.validate()?;
        tracing::debug!(
            sets = geometry.num_sets(),
            ways = geometry.associativity,
            block_bytes = %geometry.block_bytes(),
            tag_bits = geometry.tag_bits(),
            policy = policy.name(),
            "cache allocated"
        );
        Ok(Self {
            decoder: AddressDecoder::new(&geometry),
            store: CacheStore::new(&geometry),
            geometry,
            policy,
            clock: 0,
            stats: CacheStats::default(),
        })
    }

    /// Simulates one access.
    ///
    /// # Arguments
    ///
    /// * `address` - The address read from the trace.
    ///
    /// # Returns
    ///
    /// The event describing what happened.
    pub fn access(&mut self, address: u64) -> AccessEvent {
        let decoded = self.decoder.decode(address);
        let (set_index, tag, now) = (decoded.set_index, decoded.tag, self.clock);

        let (line, outcome) = if let Some(way) = self.store.lookup(set_index, tag) {
            self.policy.touch(&mut self.store, set_index, way, now);
            self.stats.record_hit();
            (way, Outcome::Hit)
        } else {
            let set = self.store.set(set_index);
            let victim = self.policy.select_victim(set, now);
            let evicted = set[victim].valid;
            self.store.install(set_index, tag, victim, now);
            self.stats.record_miss(evicted);
            (victim, Outcome::Miss)
        };

        tracing::trace!(address, set_index, tag, line, ?outcome, now, "access");
        self.clock += 1;
        AccessEvent {
            address,
            set_index,
            tag,
            line,
            outcome,
        }
    }

    /// Runs a whole trace and finishes.
    ///
    /// # Arguments
    ///
    /// * `trace` - Addresses in access order; consumed until exhausted.
    /// * `sink` - Receives one event per access.
    ///
    /// # Returns
    ///
    /// The end-of-run summary.
    pub fn run<I, S>(mut self, trace: I, sink: &mut S) -> Summary
    where
        I: IntoIterator<Item = u64>,
        S: EventSink + ?Sized,
    {
        for address in trace {
            let event = self.access(address);
            sink.record(&event);
        }
        self.finish()
    }

    /// Ends the run and returns its summary.
    pub fn finish(self) -> Summary {
        let summary = self.stats.summary();
        tracing::debug!(
            accesses = summary.total_accesses,
            hits = summary.total_hits,
            hit_rate = summary.hit_rate_percent,
            "run finished"
        );
        summary
    }

    /// Summary of the accesses simulated so far.
    pub fn summary(&self) -> Summary {
        self.stats.summary()
    }

    /// Counters for the accesses simulated so far.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// The geometry this simulator was built with.
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// Current logical time: the number of accesses simulated.
    pub const fn clock(&self) -> u64 {
        self.clock
    }

    /// Read-only view of the cache contents.
    pub const fn store(&self) -> &CacheStore {
        &self.store
    }
}
