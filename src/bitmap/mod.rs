//! Word-level bitmap primitives.
//!
//! A [`BitBlock`] is one 64-bit word of the allocator's storage. The bit
//! counting it relies on lives in `intrinsics`.

mod block;
mod intrinsics;

pub use block::BitBlock;
pub use intrinsics::popcount;
