//! Branch-free bit counting used by the word primitives.

const M1: u64 = 0x5555_5555_5555_5555; // 0101...
const M2: u64 = 0x3333_3333_3333_3333; // 00110011...
const M4: u64 = 0x0f0f_0f0f_0f0f_0f0f; // 4 zeros, 4 ones...

/// Count set bits in a word.
///
/// Divide-and-conquer SWAR reduction: pairs, nibbles, bytes, then folds the
/// byte sums down into the low byte. Fixed instruction count, no loop.
///
/// # Arguments
/// * `word` - 64-bit word
///
/// # Returns
/// Number of set bits (0-64)
///
/// # Performance
/// O(1) - 12 ALU operations regardless of input
#[inline]
pub const fn popcount(word: u64) -> u32 {
    let mut v = word;
    v -= (v >> 1) & M1;
    v = (v & M2) + ((v >> 2) & M2);
    v = (v + (v >> 4)) & M4;
    v += v >> 8;
    v += v >> 16;
    v += v >> 32;
    (v & 0x7f) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_popcount() {
        assert_eq!(popcount(0), 0);
        assert_eq!(popcount(1), 1);
        assert_eq!(popcount(3), 2);
        assert_eq!(popcount(1u64 << 63), 1);
        assert_eq!(popcount(0xff00_ff00_ff00_ff00), 32);
        assert_eq!(popcount(!0u64), 64);
    }

    #[test]
    fn test_popcount_matches_hardware() {
        let mut rng = rand::thread_rng();
        for _ in 0..10_000 {
            let word: u64 = rng.gen();
            assert_eq!(popcount(word), word.count_ones());
        }
    }
}
