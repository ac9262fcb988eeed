//! Per-access events.
//!
//! Each simulated access yields one [`AccessEvent`]. The simulator hands events to
//! an [`EventSink`]; how they are presented is up to the sink.

use std::fmt;

use serde::Serialize;

/// Whether an access hit or missed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The tag was present; its line was touched.
    Hit,
    /// The tag was absent; a line was filled or replaced.
    Miss,
}

/// Record of a single simulated access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct AccessEvent {
    /// Address as read from the trace.
    pub address: u64,
    /// Set the address mapped to.
    pub set_index: usize,
    /// Tag of the address.
    pub tag: u64,
    /// Way that hit, or way that was filled on a miss.
    pub line: usize,
    /// Hit or miss.
    pub outcome: Outcome,
}

impl AccessEvent {
    /// Returns true if the access hit.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.outcome == Outcome::Hit
    }
}

impl fmt::Display for AccessEvent {
    /// Formats the verbose per-access line, e.g. `0x000004:  Replaced line 0 in set 1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self.outcome {
            Outcome::Hit => "Hit in",
            Outcome::Miss => "Replaced",
        };
        write!(
            f,
            "{:#08x}:  {action} line {} in set {}",
            self.address, self.line, self.set_index
        )
    }
}

/// Consumer of access events.
pub trait EventSink {
    /// Receives one event, in access order.
    fn record(&mut self, event: &AccessEvent);
}

/// Sink that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    #[inline]
    fn record(&mut self, _event: &AccessEvent) {}
}

impl EventSink for Vec<AccessEvent> {
    fn record(&mut self, event: &AccessEvent) {
        self.push(*event);
    }
}

impl<F> EventSink for F
where
    F: FnMut(&AccessEvent),
{
    fn record(&mut self, event: &AccessEvent) {
        self(event);
    }
}
