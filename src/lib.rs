//! # slot-bitarray
//!
//! Fixed-capacity, thread-safe bitmap used as a slot allocator.
//!
//! ## Features
//! - O(1) occupancy test, mark and unmark of a single slot
//! - `mark_free` hands out an arbitrary free slot, refilling freed space first
//! - Lock-free `len`/`has_room` fast paths
//! - no_std compatible (requires alloc); see the `std` feature in [`sync`]

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod bit_array;
pub mod bitmap;
pub mod constants;
mod error;
pub mod sync;

pub use bit_array::BitArray;
pub use bitmap::BitBlock;
pub use constants::NOT_FOUND;
pub use error::BitArrayError;
