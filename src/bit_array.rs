//! Thread-safe fixed-capacity slot allocator.

use crate::bitmap::BitBlock;
use crate::constants::{bit_offset, block_index, blocks_for, NOT_FOUND, WORD_BITS};
use crate::error::BitArrayError;
use crate::sync::{Counter, RwLock};
use alloc::boxed::Box;
use alloc::vec;
use core::fmt;

/// Lock-protected part of the array: the words and the scan cursor.
struct Blocks {
    /// `blocks_for(capacity)` words. Bits of the last word at or past
    /// `capacity` are pinned to 1 so they are never handed out.
    words: Box<[BitBlock]>,

    /// Word the next free-slot scan starts from.
    cursor: usize,
}

impl Blocks {
    fn new(capacity: usize) -> Self {
        let mut blocks = Blocks {
            words: vec![BitBlock::EMPTY; blocks_for(capacity)].into_boxed_slice(),
            cursor: 0,
        };
        blocks.pin_spill_bits(capacity);
        blocks
    }

    /// Mark the unused tail of the last word as occupied.
    fn pin_spill_bits(&mut self, capacity: usize) {
        let used = bit_offset(capacity);
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last = BitBlock::from_bits(last.bits() | (!0u64 << used));
            }
        }
    }

    /// Find the first word with room, scanning circularly from the cursor.
    ///
    /// Leaves the cursor on the word that was found.
    fn next_free(&mut self) -> Option<usize> {
        let len = self.words.len();
        for _ in 0..len {
            if self.words[self.cursor].has_room() {
                return Some(self.cursor);
            }
            self.cursor = (self.cursor + 1) % len;
        }
        None
    }
}

/// Fixed-capacity occupancy bitmap that hands out free slots.
///
/// Tracks `capacity` slots, each free or occupied, and allocates an
/// arbitrary free slot with [`mark_free`](Self::mark_free) without the
/// caller choosing an index.
///
/// # Concurrency
/// - Words and cursor sit behind one reader/writer lock: [`get`](Self::get)
///   reads, every mutation writes.
/// - The occupied count is an atomic updated only under the write lock, so
///   [`has_room`](Self::has_room) and [`len`](Self::len) never block but may
///   be momentarily stale against an in-flight writer.
///
/// # Out-of-range policy
/// Indices `>= capacity` are absorbed silently: `get` returns `false`,
/// `set` reports no change. Use the `try_*` variants to get an error instead.
///
/// # Example
/// ```
/// use slot_bitarray::BitArray;
///
/// let slots = BitArray::new(10);
/// assert_eq!(slots.mark_free(), Some(0));
/// assert_eq!(slots.mark_free(), Some(1));
///
/// slots.unmark(0);
/// assert_eq!(slots.mark_free(), Some(0));
/// assert_eq!(slots.len(), 2);
/// ```
pub struct BitArray {
    blocks: RwLock<Blocks>,
    capacity: usize,
    count: Counter,
}

impl BitArray {
    /// Create an array of `capacity` free slots.
    ///
    /// A capacity of 0 is legal and never has room.
    pub fn new(capacity: usize) -> Self {
        let blocks = Blocks::new(capacity);
        log::debug!(
            "bit array created: capacity={}, blocks={}",
            capacity,
            blocks.words.len()
        );
        BitArray {
            blocks: RwLock::new(blocks),
            capacity,
            count: Counter::new(),
        }
    }

    /// Check if at least one slot is free.
    ///
    /// Lock-free; re-check on the mutation path before relying on it.
    #[inline]
    pub fn has_room(&self) -> bool {
        self.count.get() < self.capacity
    }

    /// Check if there is **no room left**.
    ///
    /// Note the inverted meaning: this is `!has_room()`, not "no slot is
    /// occupied". Prefer [`is_full`](Self::is_full) in new code.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.has_room()
    }

    /// Check if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        !self.has_room()
    }

    /// Number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.count.get()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of 64-bit words backing the array.
    #[inline]
    pub fn block_count(&self) -> usize {
        blocks_for(self.capacity)
    }

    /// Check if slot `index` is occupied.
    ///
    /// Returns `false` for indices outside the capacity.
    pub fn get(&self, index: usize) -> bool {
        if index >= self.capacity {
            return false;
        }
        let blocks = self.blocks.read();
        blocks.words[block_index(index)].test(bit_offset(index))
    }

    /// Set slot `index` to occupied (`true`) or free (`false`).
    ///
    /// # Returns
    /// `true` if the slot changed state. Setting a slot to the state it is
    /// already in, or passing an index outside the capacity, returns `false`.
    ///
    /// Freeing a slot below the scan cursor pulls the cursor back to it, so
    /// the next [`mark_free`](Self::mark_free) refills freed space first.
    pub fn set(&self, index: usize, occupied: bool) -> bool {
        if index >= self.capacity {
            return false;
        }
        let (i, j) = (block_index(index), bit_offset(index));

        let mut blocks = self.blocks.write();
        if occupied {
            let changed = blocks.words[i].compare_and_set(j);
            if changed {
                self.count.increment();
            }
            changed
        } else {
            let changed = blocks.words[i].compare_and_clear(j);
            if changed {
                self.count.decrement();
                if i < blocks.cursor {
                    log::trace!("cursor rewound {} -> {}", blocks.cursor, i);
                    blocks.cursor = i;
                }
            }
            changed
        }
    }

    /// Set slot `index` to occupied.
    #[inline]
    pub fn mark(&self, index: usize) {
        self.set(index, true);
    }

    /// Set slot `index` to free.
    #[inline]
    pub fn unmark(&self, index: usize) {
        self.set(index, false);
    }

    /// Free every slot.
    ///
    /// Storage is zeroed in place; capacity is unchanged and the cursor
    /// returns to the first word.
    pub fn reset(&self) {
        let mut blocks = self.blocks.write();
        blocks.words.fill(BitBlock::EMPTY);
        blocks.pin_spill_bits(self.capacity);
        blocks.cursor = 0;
        self.count.clear();
        log::debug!("bit array reset: capacity={}", self.capacity);
    }

    /// Occupy an arbitrary free slot and return its index.
    ///
    /// Picks the lowest free bit of the first word with room, scanning
    /// circularly from the cursor. The cursor stays on that word, so
    /// consecutive calls fill one word before moving on.
    ///
    /// # Returns
    /// The slot index, or `None` if every slot is occupied.
    ///
    /// # Performance
    /// O(1) when the cursor word has room, O(words) worst case, always
    /// under the write lock.
    pub fn mark_free(&self) -> Option<usize> {
        if !self.has_room() {
            log::trace!("mark_free: no room (capacity={})", self.capacity);
            return None;
        }

        let mut blocks = self.blocks.write();
        if !self.has_room() {
            log::trace!("mark_free: no room (capacity={})", self.capacity);
            return None;
        }

        let Some(i) = blocks.next_free() else {
            log::error!(
                "mark_free: counter reports {} of {} occupied but no word has room",
                self.count.get(),
                self.capacity
            );
            return None;
        };

        let block = &mut blocks.words[i];
        let j = block.first_clear_bit_index();
        block.set(j);
        self.count.increment();

        Some(i * WORD_BITS + j as usize)
    }

    /// [`mark_free`](Self::mark_free) with the integer sentinel
    /// [`NOT_FOUND`] in place of `None`.
    pub fn mark_free_raw(&self) -> i64 {
        self.mark_free().map_or(NOT_FOUND, |index| index as i64)
    }

    /// Like [`get`](Self::get), but rejects indices outside the capacity.
    pub fn try_get(&self, index: usize) -> Result<bool, BitArrayError> {
        self.check_index(index)?;
        Ok(self.get(index))
    }

    /// Like [`set`](Self::set), but rejects indices outside the capacity.
    pub fn try_set(&self, index: usize, occupied: bool) -> Result<bool, BitArrayError> {
        self.check_index(index)?;
        Ok(self.set(index, occupied))
    }

    /// Like [`mark_free`](Self::mark_free), but reports exhaustion as an
    /// error.
    pub fn try_mark_free(&self) -> Result<usize, BitArrayError> {
        self.mark_free().ok_or(BitArrayError::Exhausted {
            capacity: self.capacity,
        })
    }

    fn check_index(&self, index: usize) -> Result<(), BitArrayError> {
        if index < self.capacity {
            Ok(())
        } else {
            Err(BitArrayError::IndexOutOfRange {
                index,
                capacity: self.capacity,
            })
        }
    }
}

impl fmt::Debug for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitArray")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .field("blocks", &self.block_count())
            .finish()
    }
}
