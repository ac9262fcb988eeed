//! Simulator Unit Tests.
//!
//! Drives short traces through the simulator and checks hit/miss outcomes, the
//! lines chosen, the logical clock, and the final summary.

use cachesim_core::{
    AccessEvent, CacheGeometry, ConfigError, NullSink, Outcome, Simulator, TraceEnd, TraceReader,
};
use pretty_assertions::assert_eq;

use crate::common::{compose, reference_geometry, run_trace, simulator};

// ══════════════════════════════════════════════════════════
// 1. Reference Scenario
// ══════════════════════════════════════════════════════════

/// `[0x00, 0x00, 0x04, 0x00]`: miss, hit, miss in another set, hit.
#[test]
fn reference_trace_hits_half() {
    let (summary, events) = run_trace(reference_geometry(), &[0x00, 0x00, 0x04, 0x00]);

    let observed: Vec<(Outcome, usize, usize)> = events
        .iter()
        .map(|e| (e.outcome, e.set_index, e.line))
        .collect();
    assert_eq!(
        observed,
        vec![
            (Outcome::Miss, 0, 0),
            (Outcome::Hit, 0, 0),
            (Outcome::Miss, 1, 0),
            (Outcome::Hit, 0, 0),
        ]
    );
    assert_eq!(summary.total_accesses, 4);
    assert_eq!(summary.total_hits, 2);
    assert_eq!(summary.to_string(), "2 hits in 4 accesses; hit rate = 50.00%");
}

#[test]
fn empty_trace_has_zero_hit_rate() {
    let (summary, events) = run_trace(reference_geometry(), &[]);
    assert!(events.is_empty());
    assert_eq!(summary.total_accesses, 0);
    assert_eq!(summary.total_hits, 0);
    assert_eq!(summary.hit_rate_percent, 0.0);
    assert_eq!(summary.to_string(), "0 hits in 0 accesses; hit rate =  0.00%");
}

/// Addresses in the same block share a line regardless of offset.
#[test]
fn offsets_within_a_block_hit() {
    let (summary, events) = run_trace(reference_geometry(), &[0x40, 0x41, 0x42, 0x43, 0x44]);
    assert_eq!(summary.total_hits, 3);
    assert!(!events[0].is_hit());
    assert!(events[1..4].iter().all(|e| e.is_hit()));
    assert!(!events[4].is_hit(), "next block maps to the next set");
}

// ══════════════════════════════════════════════════════════
// 2. Fill Order and LRU Eviction
// ══════════════════════════════════════════════════════════

/// Distinct tags fill ways 0..N-1 in order, then the oldest (way 0) is evicted.
#[test]
fn fill_then_evict_way_zero() {
    let geometry = reference_geometry();
    let ways = geometry.associativity as u64;
    let mut trace: Vec<u64> = (0..ways).map(|tag| compose(&geometry, tag, 2, 0)).collect();
    trace.push(compose(&geometry, ways, 2, 0));

    let (_, events) = run_trace(geometry, &trace);
    let lines: Vec<usize> = events.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![0, 1, 2, 3, 4, 5, 6, 7, 0]);
    assert!(events.iter().all(|e| e.outcome == Outcome::Miss));
    assert!(events.iter().all(|e| e.set_index == 2));
}

/// A hit refreshes recency, so the next eviction skips that way.
#[test]
fn hit_protects_line_from_eviction() {
    let geometry = CacheGeometry::new(8, 2, 2, 2);
    let a = compose(&geometry, 1, 0, 0);
    let b = compose(&geometry, 2, 0, 0);
    let c = compose(&geometry, 3, 0, 0);

    let (_, events) = run_trace(geometry, &[a, b, a, c, a, b]);
    let observed: Vec<(Outcome, usize)> = events.iter().map(|e| (e.outcome, e.line)).collect();
    assert_eq!(
        observed,
        vec![
            (Outcome::Miss, 0),
            (Outcome::Miss, 1),
            (Outcome::Hit, 0),
            // b (way 1) is now least recently used.
            (Outcome::Miss, 1),
            (Outcome::Hit, 0),
            (Outcome::Miss, 1),
        ]
    );
}

/// Sets are independent: filling one never disturbs another.
#[test]
fn sets_do_not_interfere() {
    let geometry = CacheGeometry::new(8, 2, 2, 1);
    let a = compose(&geometry, 1, 0, 0);
    let b = compose(&geometry, 1, 1, 0);
    let c = compose(&geometry, 2, 1, 0);

    let (summary, events) = run_trace(geometry, &[a, b, c, b, a]);
    assert_eq!(summary.total_hits, 1);
    assert!(events[4].is_hit());
}

/// A direct-mapped cache always uses way 0.
#[test]
fn direct_mapped_uses_single_way() {
    let geometry = CacheGeometry::new(16, 4, 4, 1);
    let trace: Vec<u64> = (0..64).map(|i| i * 0x100).collect();
    let (_, events) = run_trace(geometry, &trace);
    assert!(events.iter().all(|e| e.line == 0));
}

// ══════════════════════════════════════════════════════════
// 3. Clock, Counters, and Store State
// ══════════════════════════════════════════════════════════

#[test]
fn clock_advances_once_per_access() {
    let mut sim = simulator(reference_geometry());
    assert_eq!(sim.clock(), 0);
    for (i, address) in [0x00, 0x00, 0x10, 0x00].into_iter().enumerate() {
        let _ = sim.access(address);
        assert_eq!(sim.clock(), i as u64 + 1);
    }
}

#[test]
fn lines_are_stamped_with_access_time() {
    let mut sim = simulator(reference_geometry());
    let first = sim.access(0x00);
    let _ = sim.access(0x10);
    let _ = sim.access(0x00);

    let set = sim.store().set(first.set_index);
    assert_eq!(set[0].last_used, 2, "hit refreshes the stamp");
    assert_eq!(set[1].last_used, 1);
}

#[test]
fn stats_track_fills_and_evictions() {
    let geometry = CacheGeometry::new(8, 2, 0, 2);
    let mut sim = simulator(geometry);
    for tag in [1, 2, 3, 1] {
        let _ = sim.access(compose(&geometry, tag, 0, 0));
    }
    let stats = sim.stats();
    assert_eq!(stats.accesses, 4);
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.fills, 2);
    assert_eq!(stats.evictions, 2);
    assert_eq!(stats.installs(), stats.misses);
    assert_eq!(sim.store().occupancy(), 2);
}

#[test]
fn summary_matches_finish() {
    let mut sim = simulator(reference_geometry());
    for address in [0x00, 0x04, 0x00] {
        let _ = sim.access(address);
    }
    let midway = sim.summary();
    assert_eq!(midway, sim.finish());
}

#[test]
fn run_accepts_a_closure_sink() {
    let mut lines = Vec::new();
    let summary = simulator(reference_geometry()).run([0x00, 0x00], &mut |event: &AccessEvent| {
        lines.push(format!("{event}"));
    });
    assert_eq!(summary.total_hits, 1);
    assert_eq!(
        lines,
        vec![
            "0x000000:  Replaced line 0 in set 0".to_string(),
            "0x000000:  Hit in line 0 in set 0".to_string(),
        ]
    );
}

#[test]
fn geometry_is_retained() {
    let geometry = CacheGeometry::new(32, 5, 6, 4);
    let sim = simulator(geometry);
    assert_eq!(sim.geometry(), &geometry);
    assert_eq!(sim.store().num_sets(), 64);
    assert_eq!(sim.store().ways(), 4);
}

// ══════════════════════════════════════════════════════════
// 4. Configuration Errors
// ══════════════════════════════════════════════════════════

#[test]
fn invalid_geometry_is_rejected() {
    let result = Simulator::new(CacheGeometry::new(8, 5, 4, 2));
    assert!(matches!(
        result,
        Err(ConfigError::FieldsExceedAddress {
            block_offset_bits: 5,
            set_index_bits: 4,
            address_bits: 8
        })
    ));
}

#[test]
fn zero_ways_is_rejected() {
    assert!(matches!(
        Simulator::new(CacheGeometry::new(8, 2, 2, 0)),
        Err(ConfigError::ZeroAssociativity)
    ));
}

// ══════════════════════════════════════════════════════════
// 5. Large Addresses
// ══════════════════════════════════════════════════════════

/// Addresses wider than `address_bits` still decode; the extra bits join the tag.
#[test]
fn addresses_beyond_width_use_extended_tag() {
    let (summary, events) = run_trace(reference_geometry(), &[0x1_00, 0x00, 0x1_00]);
    assert_eq!(summary.total_hits, 1);
    assert_eq!(events[0].tag, 0x10);
    assert_eq!(events[1].tag, 0x0);
    assert!(events[2].is_hit());
}

#[test]
fn null_sink_run_counts_everything() {
    let summary = simulator(reference_geometry()).run(0..256u64, &mut NullSink);
    assert_eq!(summary.total_accesses, 256);
    // 64 blocks of 4 bytes; each block's first byte misses.
    assert_eq!(summary.total_hits, 192);
    assert_eq!(summary.hit_rate_percent, 75.0);
}

/// A text trace feeds the simulator directly; the run stops where the reader does.
#[test]
fn trace_reader_drives_a_run() {
    let mut reader = TraceReader::new("0 0\n4 0 zz 8\n".as_bytes());
    let mut events: Vec<AccessEvent> = Vec::new();
    let summary = simulator(reference_geometry()).run(reader.by_ref(), &mut events);

    assert_eq!(summary.to_string(), "2 hits in 4 accesses; hit rate = 50.00%");
    assert_eq!(events.len(), 4);
    assert_eq!(reader.end(), Some(&TraceEnd::Malformed("zz".to_string())));
}
