//! Set-Associative Cache Model.
//!
//! This module implements the cache proper. It provides:
//! 1. **Decoding:** Splitting an address into tag, set index, and offset ([`addr`]).
//! 2. **Storage:** A flat array of lines grouped into sets ([`store`]).
//! 3. **Replacement:** Victim selection and recency updates ([`policies`]).
//!
//! The [`Simulator`](crate::sim::Simulator) ties the three together and owns the
//! only instance of the storage for a run.

/// Address decomposition into tag, set index, and block offset.
pub mod addr;

/// Cache replacement policy implementations.
pub mod policies;

/// Line and set storage.
pub mod store;

pub use addr::{AddressDecoder, DecodedAddress};
pub use policies::{LruPolicy, ReplacementPolicy};
pub use store::{CacheLine, CacheStore};
