//! Core constants and index arithmetic for slot-bitarray.

/// Number of bits in one storage word.
pub const WORD_BITS: usize = u64::BITS as usize;

/// Bit pattern of a word with every slot occupied.
pub const FULL_BLOCK: u64 = u64::MAX;

/// Conventional integer sentinel for "no free slot".
///
/// Only returned by [`BitArray::mark_free_raw`](crate::BitArray::mark_free_raw);
/// the rest of the API uses `Option::None`.
pub const NOT_FOUND: i64 = -1;

/// Index of the word holding logical slot `index`.
#[inline]
pub const fn block_index(index: usize) -> usize {
    index / WORD_BITS
}

/// Bit position of logical slot `index` inside its word (0-63).
#[inline]
pub const fn bit_offset(index: usize) -> u32 {
    (index % WORD_BITS) as u32
}

/// Number of words needed to hold `capacity` slots.
#[inline]
pub const fn blocks_for(capacity: usize) -> usize {
    capacity.div_ceil(WORD_BITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_split() {
        assert_eq!((block_index(0), bit_offset(0)), (0, 0));
        assert_eq!((block_index(63), bit_offset(63)), (0, 63));
        assert_eq!((block_index(64), bit_offset(64)), (1, 0));
        assert_eq!((block_index(4000), bit_offset(4000)), (62, 32));
    }

    #[test]
    fn test_blocks_for() {
        assert_eq!(blocks_for(0), 0);
        assert_eq!(blocks_for(1), 1);
        assert_eq!(blocks_for(64), 1);
        assert_eq!(blocks_for(65), 2);
        assert_eq!(blocks_for(1_000_000), 15_625);
    }
}
