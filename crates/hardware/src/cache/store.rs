//! Set-associative line storage.
//!
//! All lines live in one contiguous vector; line `way` of set `set` sits at
//! `set * ways + way`. Lines start invalid and become valid only through
//! [`CacheStore::install`]. Nothing ever invalidates a filled line: replacement
//! only rewrites its tag and timestamp.

use crate::config::CacheGeometry;

/// Cache line entry holding tag, validity, and recency stamp.
///
/// `tag` and `last_used` are meaningful only while `valid` is set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Whether the line holds a block.
    pub valid: bool,
    /// Tag of the block held by the line.
    pub tag: u64,
    /// Logical time of the most recent install or hit.
    pub last_used: u64,
}

/// Fixed-capacity set-associative storage.
#[derive(Clone, Debug)]
pub struct CacheStore {
    lines: Vec<CacheLine>,
    num_sets: usize,
    ways: usize,
}

impl CacheStore {
    /// Allocates `num_sets * associativity` invalid lines.
    ///
    /// # Arguments
    ///
    /// * `geometry` - A geometry that passed [`CacheGeometry::validate`].
    pub fn new(geometry: &CacheGeometry) -> Self {
        let num_sets = geometry.num_sets();
        let ways = geometry.associativity;
        Self {
            lines: vec![CacheLine::default(); num_sets * ways],
            num_sets,
            ways,
        }
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Lines per set.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Returns the lines of one set in way order.
    ///
    /// # Panics
    ///
    /// Panics if `set_index >= num_sets()`.
    pub fn set(&self, set_index: usize) -> &[CacheLine] {
        let base = self.base(set_index);
        &self.lines[base..base + self.ways]
    }

    /// Iterates over every set in index order.
    pub fn sets(&self) -> impl Iterator<Item = &[CacheLine]> {
        self.lines.chunks_exact(self.ways)
    }

    /// Finds the way holding `tag` in the given set.
    ///
    /// Scans ways in index order and returns the first valid match.
    ///
    /// # Panics
    ///
    /// Panics if `set_index >= num_sets()`.
    pub fn lookup(&self, set_index: usize, tag: u64) -> Option<usize> {
        self.set(set_index)
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }

    /// Fills a line with `tag`, marking it valid and stamping it with `now`.
    ///
    /// Overwrites whatever the line held. The caller picks the way.
    ///
    /// # Panics
    ///
    /// Panics if `set_index` or `way` is out of range.
    pub fn install(&mut self, set_index: usize, tag: u64, way: usize, now: u64) {
        let idx = self.index(set_index, way);
        self.lines[idx] = CacheLine {
            valid: true,
            tag,
            last_used: now,
        };
    }

    /// Stamps an already valid line with `now`.
    ///
    /// # Panics
    ///
    /// Panics if `set_index` or `way` is out of range, or the line is invalid.
    pub fn touch(&mut self, set_index: usize, way: usize, now: u64) {
        let idx = self.index(set_index, way);
        let line = &mut self.lines[idx];
        assert!(line.valid, "touch of invalid line {way} in set {set_index}");
        line.last_used = now;
    }

    /// Number of valid lines across the whole cache.
    pub fn occupancy(&self) -> usize {
        self.lines.iter().filter(|line| line.valid).count()
    }

    fn base(&self, set_index: usize) -> usize {
        assert!(
            set_index < self.num_sets,
            "set index {set_index} out of range (sets = {})",
            self.num_sets
        );
        set_index * self.ways
    }

    fn index(&self, set_index: usize, way: usize) -> usize {
        assert!(
            way < self.ways,
            "way {way} out of range (associativity = {})",
            self.ways
        );
        self.base(set_index) + way
    }
}
