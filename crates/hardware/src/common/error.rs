//! Configuration error definitions.
//!
//! This module defines the one recoverable failure class of the simulator. It provides:
//! 1. **Geometry violations:** Offset and index fields wider than the address, zero ways,
//!    and caches too large to allocate.
//! 2. **Loading failures:** Unreadable or malformed JSON configuration files.
//!
//! Malformed trace input is not an error: the trace reader stops and records why
//! (see [`TraceEnd`](crate::sim::trace::TraceEnd)). Out-of-range indices passed between
//! the decoder, store, and policy are contract violations and panic.

use thiserror::Error;

/// Errors raised while building or validating a cache configuration.
///
/// Every variant is fatal: no simulation output is produced once one is returned.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The address width is zero or wider than a `u64`.
    #[error("address width of {address_bits} bits is out of range (1..={max})")]
    AddressBitsOutOfRange {
        /// Requested address width.
        address_bits: u32,
        /// Widest supported address.
        max: u32,
    },

    /// Offset and set-index fields do not fit inside the address.
    #[error(
        "block offset bits ({block_offset_bits}) + set index bits ({set_index_bits}) \
         exceed the address width ({address_bits})"
    )]
    FieldsExceedAddress {
        /// Requested block offset width.
        block_offset_bits: u32,
        /// Requested set index width.
        set_index_bits: u32,
        /// Requested address width.
        address_bits: u32,
    },

    /// A set must hold at least one line.
    #[error("associativity must be at least 1")]
    ZeroAssociativity,

    /// The cache would hold more lines than can be allocated.
    #[error(
        "2^{set_index_bits} sets x {associativity} ways exceeds the limit of {max} lines"
    )]
    TooManyLines {
        /// Requested set index width.
        set_index_bits: u32,
        /// Requested lines per set.
        associativity: usize,
        /// Largest supported line count.
        max: usize,
    },

    /// The configuration file could not be read.
    #[error("could not read config file '{path}': {source}")]
    Io {
        /// Path that failed to open.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration document is not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
