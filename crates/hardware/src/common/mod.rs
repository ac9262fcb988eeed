//! Common types shared across the cache simulator.
//!
//! Currently this holds the error taxonomy; address decomposition lives with the
//! cache model in [`crate::cache::addr`].

/// Error types for configuration and loading.
pub mod error;

pub use error::ConfigError;
