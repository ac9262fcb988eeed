//! Configuration system for the cache simulator.
//!
//! This module defines the structures used to parameterize a simulation run. It provides:
//! 1. **Defaults:** The reference geometry (8-bit addresses, 4-byte blocks, 4 sets, 8 ways).
//! 2. **Geometry:** `CacheGeometry`, its derived sizes, and validation.
//! 3. **Root config:** `Config`, loaded from JSON or built from `Config::default()`.
//!
//! A geometry is immutable for the duration of a run. Validation happens before the
//! simulator allocates any storage, so a bad configuration never produces output.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values reproduce the reference lab geometry when not explicitly
/// overridden in a JSON configuration file or on the command line.
mod defaults {
    /// Width of a memory address in bits.
    pub const ADDRESS_BITS: u32 = 8;

    /// log2 of the block size (4-byte blocks).
    pub const BLOCK_OFFSET_BITS: u32 = 2;

    /// log2 of the set count (4 sets).
    pub const SET_INDEX_BITS: u32 = 2;

    /// Lines per set (8-way set associative).
    pub const ASSOCIATIVITY: usize = 8;

    /// Print one line per access.
    pub const VERBOSE: bool = true;
}

/// Largest number of lines a single cache may hold (16 Mi lines).
///
/// Guards the flat line array against geometries that cannot be allocated.
pub const MAX_LINES: usize = 1 << 24;

/// Widest supported address; addresses are held in a `u64`.
pub const MAX_ADDRESS_BITS: u32 = u64::BITS;

/// Set-associative cache geometry.
///
/// Describes how an address is split into tag, set index, and block offset,
/// and how many lines each set holds.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::CacheGeometry;
///
/// let geometry = CacheGeometry::default();
/// assert_eq!(geometry.num_sets(), 4);
/// assert_eq!(geometry.tag_bits(), 4);
/// assert_eq!(geometry.capacity_bytes(), 128);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheGeometry {
    /// Number of bits in an address.
    #[serde(default = "CacheGeometry::default_address_bits")]
    pub address_bits: u32,

    /// log2 of the block size in bytes.
    #[serde(default = "CacheGeometry::default_block_offset_bits")]
    pub block_offset_bits: u32,

    /// log2 of the number of sets.
    #[serde(default = "CacheGeometry::default_set_index_bits")]
    pub set_index_bits: u32,

    /// Lines per set. Need not be a power of two.
    #[serde(default = "CacheGeometry::default_associativity")]
    pub associativity: usize,
}

impl CacheGeometry {
    /// Creates a geometry from its four parameters without validating it.
    ///
    /// # Arguments
    ///
    /// * `address_bits` - Width of an address in bits.
    /// * `block_offset_bits` - log2 of the block size.
    /// * `set_index_bits` - log2 of the set count.
    /// * `associativity` - Lines per set.
    pub const fn new(
        address_bits: u32,
        block_offset_bits: u32,
        set_index_bits: u32,
        associativity: usize,
    ) -> Self {
        Self {
            address_bits,
            block_offset_bits,
            set_index_bits,
            associativity,
        }
    }

    fn default_address_bits() -> u32 {
        defaults::ADDRESS_BITS
    }

    fn default_block_offset_bits() -> u32 {
        defaults::BLOCK_OFFSET_BITS
    }

    fn default_set_index_bits() -> u32 {
        defaults::SET_INDEX_BITS
    }

    fn default_associativity() -> usize {
        defaults::ASSOCIATIVITY
    }

    /// Checks every geometry invariant.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the geometry can be simulated, otherwise the first violated
    /// constraint as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address_bits == 0 || self.address_bits > MAX_ADDRESS_BITS {
            return Err(ConfigError::AddressBitsOutOfRange {
                address_bits: self.address_bits,
                max: MAX_ADDRESS_BITS,
            });
        }
        let used = self.block_offset_bits.checked_add(self.set_index_bits);
        if used.is_none_or(|used| used > self.address_bits) {
            return Err(ConfigError::FieldsExceedAddress {
                block_offset_bits: self.block_offset_bits,
                set_index_bits: self.set_index_bits,
                address_bits: self.address_bits,
            });
        }
        if self.associativity == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        let lines = 1usize
            .checked_shl(self.set_index_bits)
            .and_then(|sets| sets.checked_mul(self.associativity));
        match lines {
            Some(lines) if lines <= MAX_LINES => Ok(()),
            _ => Err(ConfigError::TooManyLines {
                set_index_bits: self.set_index_bits,
                associativity: self.associativity,
                max: MAX_LINES,
            }),
        }
    }

    /// Number of tag bits left after removing the offset and index fields.
    ///
    /// Saturates at zero for geometries that have not been validated.
    #[inline]
    pub const fn tag_bits(&self) -> u32 {
        self.address_bits
            .saturating_sub(self.block_offset_bits)
            .saturating_sub(self.set_index_bits)
    }

    /// Number of sets (`2^set_index_bits`).
    ///
    /// Only meaningful for a geometry that passed [`CacheGeometry::validate`];
    /// an index field wider than `usize` yields zero.
    #[inline]
    pub fn num_sets(&self) -> usize {
        1usize.checked_shl(self.set_index_bits).unwrap_or(0)
    }

    /// Block size in bytes (`2^block_offset_bits`).
    ///
    /// Held in a `u128` so a 64-bit offset field is still representable.
    #[inline]
    pub fn block_bytes(&self) -> u128 {
        1u128.checked_shl(self.block_offset_bits).unwrap_or(0)
    }

    /// Total number of lines across all sets.
    #[inline]
    pub fn num_lines(&self) -> usize {
        self.num_sets().saturating_mul(self.associativity)
    }

    /// Data capacity of the cache in bytes.
    pub fn capacity_bytes(&self) -> u128 {
        (self.num_lines() as u128).saturating_mul(self.block_bytes())
    }
}

impl Default for CacheGeometry {
    fn default() -> Self {
        Self::new(
            defaults::ADDRESS_BITS,
            defaults::BLOCK_OFFSET_BITS,
            defaults::SET_INDEX_BITS,
            defaults::ASSOCIATIVITY,
        )
    }
}

impl fmt::Display for CacheGeometry {
    /// Formats the banner printed before a run.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The cache has {} sets, each with {} lines, total size = {} bytes",
            self.num_sets(),
            self.associativity,
            self.capacity_bytes()
        )
    }
}

/// General run options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Print a line for every access (hit or replacement).
    #[serde(default = "GeneralConfig::default_verbose")]
    pub verbose: bool,
}

impl GeneralConfig {
    fn default_verbose() -> bool {
        defaults::VERBOSE
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: defaults::VERBOSE,
        }
    }
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::Config;
///
/// let json = r#"{
///     "cache": { "set_index_bits": 3, "associativity": 2, "address_bits": 16 },
///     "general": { "verbose": false }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.cache.num_sets(), 8);
/// assert_eq!(config.cache.block_offset_bits, 2);
/// assert!(!config.general.verbose);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Cache geometry.
    #[serde(default)]
    pub cache: CacheGeometry,
    /// Output options.
    #[serde(default)]
    pub general: GeneralConfig,
}

impl Config {
    /// Parses and validates a configuration from a JSON string.
    ///
    /// # Arguments
    ///
    /// * `json` - The JSON document. Missing fields take their defaults.
    ///
    /// # Returns
    ///
    /// The configuration, or a [`ConfigError`] if the document is malformed or
    /// the geometry is invalid.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.cache.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON configuration file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }
}
