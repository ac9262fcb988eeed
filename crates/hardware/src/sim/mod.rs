//! Trace-driven simulation.
//!
//! Provides the simulator loop, the events it emits, and the reader that turns a
//! text stream into addresses.

/// Per-access events and sinks.
pub mod event;
/// Top-level simulator (cache + counters + logical clock).
pub mod simulator;
/// Hexadecimal address trace reader.
pub mod trace;

pub use event::{AccessEvent, EventSink, NullSink, Outcome};
pub use simulator::Simulator;
pub use trace::{TraceEnd, TraceReader};
