//! Address decomposition.
//!
//! Splits a trace address into `(tag, set index, block offset)` for a given
//! [`CacheGeometry`]. Every mask is derived from the configured field widths, so
//! the decoder works for any validated geometry rather than one fixed set count.
//!
//! ```text
//!  63                    offset+index      offset        0
//! +-------------------------+----------------+-----------+
//! |           tag           |   set index    |  offset   |
//! +-------------------------+----------------+-----------+
//! ```
//!
//! Bits above `address_bits` are not masked off: they simply become part of the tag.

use crate::config::CacheGeometry;

/// The three fields of a decoded address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodedAddress {
    /// High-order bits identifying the block.
    pub tag: u64,
    /// Set the block maps to.
    pub set_index: usize,
    /// Byte within the block. Not used for hit/miss decisions.
    pub offset: u64,
}

/// Returns a mask with the low `bits` bits set.
#[inline(always)]
const fn low_mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Decodes addresses for one geometry.
///
/// Shift amounts and masks are computed once at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressDecoder {
    index_shift: u32,
    tag_shift: u32,
    offset_mask: u64,
    index_mask: u64,
}

impl AddressDecoder {
    /// Creates a decoder for the given geometry.
    ///
    /// # Arguments
    ///
    /// * `geometry` - A geometry that passed [`CacheGeometry::validate`].
    pub const fn new(geometry: &CacheGeometry) -> Self {
        let offset_bits = geometry.block_offset_bits;
        Self {
            index_shift: offset_bits,
            tag_shift: offset_bits.saturating_add(geometry.set_index_bits),
            offset_mask: low_mask(offset_bits),
            index_mask: low_mask(geometry.set_index_bits),
        }
    }

    /// Splits `address` into tag, set index, and offset.
    ///
    /// Accepts any `u64`. Shifting by the full address width yields zero rather
    /// than overflowing.
    #[inline]
    pub fn decode(&self, address: u64) -> DecodedAddress {
        let set_index = address.checked_shr(self.index_shift).unwrap_or(0) & self.index_mask;
        DecodedAddress {
            tag: address.checked_shr(self.tag_shift).unwrap_or(0),
            set_index: set_index as usize,
            offset: address & self.offset_mask,
        }
    }
}

/// Decodes a single address without keeping a decoder around.
///
/// # Arguments
///
/// * `address` - The trace address.
/// * `geometry` - The cache geometry.
///
/// # Returns
///
/// The decoded `(tag, set index, offset)` fields.
pub fn decode(address: u64, geometry: &CacheGeometry) -> DecodedAddress {
    AddressDecoder::new(geometry).decode(address)
}
