//! Single-word occupancy primitives.

use crate::bitmap::popcount;
use crate::constants::FULL_BLOCK;

/// A 64-bit word treated as 64 independent occupancy flags.
///
/// Bit `j` set means the slot mapped to `(word, j)` is occupied. The type
/// carries no locking of its own; [`BitArray`](crate::BitArray) guards every
/// word behind its reader/writer lock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct BitBlock(u64);

impl BitBlock {
    /// Word with every slot free.
    pub const EMPTY: BitBlock = BitBlock(0);

    /// Word with every slot occupied.
    pub const FULL: BitBlock = BitBlock(FULL_BLOCK);

    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        BitBlock(bits)
    }

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    const fn mask(bit: u32) -> u64 {
        debug_assert!(bit < 64);
        1u64 << bit
    }

    /// Check if `bit` is set.
    ///
    /// # Arguments
    /// * `bit` - Bit position (0-63)
    #[inline]
    pub const fn test(self, bit: u32) -> bool {
        self.0 & Self::mask(bit) != 0
    }

    /// Set `bit` unconditionally.
    #[inline]
    pub fn set(&mut self, bit: u32) {
        self.0 |= Self::mask(bit);
    }

    /// Clear `bit` unconditionally.
    #[inline]
    pub fn clear(&mut self, bit: u32) {
        self.0 &= !Self::mask(bit);
    }

    /// Set `bit` only if it is currently clear.
    ///
    /// # Returns
    /// `true` if the bit was clear and is now set, `false` if it was
    /// already set (the word is left untouched).
    #[inline]
    pub fn compare_and_set(&mut self, bit: u32) -> bool {
        let mask = Self::mask(bit);
        let changed = self.0 & mask == 0;
        if changed {
            self.0 |= mask;
        }
        changed
    }

    /// Clear `bit` only if it is currently set.
    ///
    /// # Returns
    /// `true` if the bit was set and is now clear, `false` otherwise.
    #[inline]
    pub fn compare_and_clear(&mut self, bit: u32) -> bool {
        let mask = Self::mask(bit);
        let changed = self.0 & mask != 0;
        if changed {
            self.0 &= !mask;
        }
        changed
    }

    /// Check if all 64 bits are set.
    #[inline]
    pub const fn is_full(self) -> bool {
        self.0 == FULL_BLOCK
    }

    #[inline]
    pub const fn has_room(self) -> bool {
        !self.is_full()
    }

    /// Number of set bits.
    #[inline]
    pub const fn count_ones(self) -> u32 {
        popcount(self.0)
    }

    /// Position of the lowest clear bit.
    ///
    /// `w & (!w - 1)` keeps exactly the run of trailing ones below the first
    /// zero, so its population count is that zero's position.
    ///
    /// # Panics
    /// If the word is full. Callers must check [`has_room`](Self::has_room)
    /// first.
    ///
    /// # Performance
    /// O(1) - branch-free SWAR popcount
    #[inline]
    pub fn first_clear_bit_index(self) -> u32 {
        assert!(!self.is_full(), "first_clear_bit_index called on a full word");
        popcount(self.0 & (!self.0).wrapping_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_clear() {
        let mut block = BitBlock::EMPTY;

        block.set(0);
        block.set(63);
        assert!(block.test(0));
        assert!(block.test(63));
        assert!(!block.test(1));
        assert_eq!(block.bits(), 1 | (1u64 << 63));

        block.clear(0);
        assert!(!block.test(0));
        assert_eq!(block.bits(), 1u64 << 63);
    }

    #[test]
    fn test_compare_and_set() {
        let mut block = BitBlock::from_bits(10);

        assert!(!block.compare_and_set(1));
        assert_eq!(block.bits(), 10);

        assert!(block.compare_and_set(0));
        assert_eq!(block.bits(), 11);

        // Idempotent
        assert!(!block.compare_and_set(0));
        assert_eq!(block.bits(), 11);
    }

    #[test]
    fn test_compare_and_clear() {
        let mut block = BitBlock::from_bits(0b1010);

        assert!(!block.compare_and_clear(0));
        assert!(block.compare_and_clear(3));
        assert_eq!(block.bits(), 0b0010);
        assert!(!block.compare_and_clear(3));
    }

    #[test]
    fn test_is_full() {
        assert!(BitBlock::FULL.is_full());
        assert!(!BitBlock::EMPTY.is_full());

        let mut block = BitBlock::FULL;
        block.clear(42);
        assert!(!block.is_full());
        assert!(block.has_room());
    }

    #[test]
    fn test_first_clear_bit_index() {
        assert_eq!(BitBlock::EMPTY.first_clear_bit_index(), 0);
        assert_eq!(BitBlock::from_bits(0b1).first_clear_bit_index(), 1);
        assert_eq!(BitBlock::from_bits(0b1011).first_clear_bit_index(), 2);
        assert_eq!(BitBlock::from_bits(0b1110).first_clear_bit_index(), 0);
        assert_eq!(BitBlock::from_bits(!(1u64 << 63)).first_clear_bit_index(), 63);

        for bit in 0..64 {
            let block = BitBlock::from_bits(!(1u64 << bit));
            assert_eq!(block.first_clear_bit_index(), bit);
        }
    }

    #[test]
    #[should_panic]
    fn test_first_clear_bit_index_full() {
        BitBlock::FULL.first_clear_bit_index();
    }

    #[test]
    fn test_count_ones() {
        assert_eq!(BitBlock::EMPTY.count_ones(), 0);
        assert_eq!(BitBlock::FULL.count_ones(), 64);
        assert_eq!(BitBlock::from_bits(0b1011).count_ones(), 3);
    }
}
