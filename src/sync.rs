//! Lock and counter primitives behind [`BitArray`](crate::BitArray).
//!
//! The reader/writer lock is chosen at compile time:
//! - `std` (default): `parking_lot::RwLock`, contended threads park
//! - no `std`: `spin::RwLock`, contended threads spin
//!
//! ```bash
//! cargo build                        # parking lock
//! cargo build --no-default-features  # spinning lock, no_std
//! ```

use core::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "std")]
pub(crate) use parking_lot::RwLock;

#[cfg(not(feature = "std"))]
pub(crate) use spin::RwLock;

/// Occupied-slot counter readable without the array lock.
///
/// Writers only ever touch it while holding the write lock, so it never
/// disagrees with the words for longer than one critical section. Readers
/// outside the lock may see a value that is momentarily stale.
#[derive(Debug, Default)]
pub struct Counter {
    inner: AtomicUsize,
}

impl Counter {
    #[inline(always)]
    pub const fn new() -> Self {
        Counter {
            inner: AtomicUsize::new(0),
        }
    }

    #[inline(always)]
    pub fn get(&self) -> usize {
        self.inner.load(Ordering::Acquire)
    }

    #[inline(always)]
    pub fn increment(&self) {
        self.inner.fetch_add(1, Ordering::Release);
    }

    #[inline(always)]
    pub fn decrement(&self) {
        let prev = self.inner.fetch_sub(1, Ordering::Release);
        debug_assert!(prev > 0, "occupied counter underflow");
    }

    #[inline(always)]
    pub fn clear(&self) {
        self.inner.store(0, Ordering::Release);
    }
}
