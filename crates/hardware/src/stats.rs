//! Simulation statistics collection and reporting.
//!
//! This module tracks hit/miss behavior for a run. It provides:
//! 1. **Counters:** Accesses, hits, and misses split into cold fills and evictions.
//! 2. **Summary:** The final `{accesses, hits, hit rate}` record printed at the end of a run.
//! 3. **Report:** A sectioned, human-readable dump of every counter.

use std::fmt;
use std::io::{self, Write};

use serde::Serialize;

/// Returns `part / whole` as a percentage, or `0.0` when `whole` is zero.
#[inline]
fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}

/// Hit/miss counters for one run.
///
/// Every access is exactly one hit or one miss, and every miss installs exactly
/// one line, either into an empty way (`fills`) or over a valid one (`evictions`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Total accesses simulated.
    pub accesses: u64,
    /// Accesses that found their tag in the cache.
    pub hits: u64,
    /// Accesses that did not.
    pub misses: u64,
    /// Misses that filled an invalid way.
    pub fills: u64,
    /// Misses that overwrote a valid way.
    pub evictions: u64,
}

impl CacheStats {
    /// Records a hit.
    #[inline]
    pub fn record_hit(&mut self) {
        self.accesses += 1;
        self.hits += 1;
    }

    /// Records a miss.
    ///
    /// # Arguments
    ///
    /// * `evicted` - Whether the installed line replaced a valid one.
    #[inline]
    pub fn record_miss(&mut self, evicted: bool) {
        self.accesses += 1;
        self.misses += 1;
        if evicted {
            self.evictions += 1;
        } else {
            self.fills += 1;
        }
    }

    /// Number of lines written by misses (`fills + evictions`).
    pub const fn installs(&self) -> u64 {
        self.fills + self.evictions
    }

    /// Hit rate as a percentage in `[0, 100]`; `0.0` for an empty trace.
    pub fn hit_rate(&self) -> f64 {
        percent(self.hits, self.accesses)
    }

    /// Miss rate as a percentage in `[0, 100]`; `0.0` for an empty trace.
    pub fn miss_rate(&self) -> f64 {
        percent(self.misses, self.accesses)
    }

    /// Builds the end-of-run summary.
    pub fn summary(&self) -> Summary {
        Summary {
            total_accesses: self.accesses,
            total_hits: self.hits,
            hit_rate_percent: self.hit_rate(),
        }
    }

    /// Writes every counter, grouped into sections.
    ///
    /// # Arguments
    ///
    /// * `out` - Destination writer.
    ///
    /// # Errors
    ///
    /// Returns any error raised by `out`.
    pub fn write_report(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "==========================================================")?;
        writeln!(out, "CACHE SIMULATION STATISTICS")?;
        writeln!(out, "==========================================================")?;
        writeln!(out, "sim_accesses             {}", self.accesses)?;
        writeln!(
            out,
            "sim_hits                 {} ({:.2}%)",
            self.hits,
            self.hit_rate()
        )?;
        writeln!(
            out,
            "sim_misses               {} ({:.2}%)",
            self.misses,
            self.miss_rate()
        )?;
        writeln!(out, "----------------------------------------------------------")?;
        writeln!(out, "MISS BREAKDOWN")?;
        writeln!(
            out,
            "  miss.fill              {} ({:.2}%)",
            self.fills,
            percent(self.fills, self.misses)
        )?;
        writeln!(
            out,
            "  miss.evict             {} ({:.2}%)",
            self.evictions,
            percent(self.evictions, self.misses)
        )?;
        writeln!(out, "==========================================================")
    }
}

/// Final result of a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Summary {
    /// Total accesses simulated.
    pub total_accesses: u64,
    /// Accesses that hit.
    pub total_hits: u64,
    /// `total_hits / total_accesses * 100`, or `0.0` for an empty trace.
    pub hit_rate_percent: f64,
}

impl fmt::Display for Summary {
    /// Formats the summary line, e.g. `2 hits in 4 accesses; hit rate = 50.00%`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hits in {} accesses; hit rate = {:5.2}%",
            self.total_hits, self.total_accesses, self.hit_rate_percent
        )
    }
}
