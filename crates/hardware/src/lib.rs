//! Trace-driven set-associative cache simulator library.
//!
//! This crate models a single cache fed by a trace of memory addresses:
//! 1. **Cache:** Address decoding, flat set-associative storage, and LRU replacement.
//! 2. **Simulation:** The per-access loop, its events, and the hexadecimal trace reader.
//! 3. **Configuration:** Geometry defaults, JSON loading, and validation.
//! 4. **Statistics:** Hit/miss counters and the end-of-run summary.
//!
//! Runs are single-threaded and deterministic: the same trace and geometry always
//! produce the same events and summary. Time is a logical access counter.
//!
//! ```
//! use cachesim_core::{CacheGeometry, NullSink, Simulator};
//!
//! let sim = Simulator::new(CacheGeometry::default()).unwrap();
//! let summary = sim.run([0x00, 0x00, 0x04, 0x00], &mut NullSink);
//! assert_eq!(summary.to_string(), "2 hits in 4 accesses; hit rate = 50.00%");
//! ```

/// Cache model (decoder, storage, replacement policies).
pub mod cache;
/// Common types (errors).
pub mod common;
/// Simulator configuration (defaults, geometry, JSON loading).
pub mod config;
/// Simulator loop, events, and trace reading.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Error returned for invalid or unreadable configurations.
pub use crate::common::ConfigError;
/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::{CacheGeometry, Config};
/// Simulator and its event plumbing.
pub use crate::sim::{AccessEvent, EventSink, NullSink, Outcome, Simulator, TraceEnd, TraceReader};
/// Counters and final summary.
pub use crate::stats::{CacheStats, Summary};
