use thiserror::Error;

/// Failure of one of the checked `try_*` operations on a
/// [`BitArray`](crate::BitArray).
///
/// The unchecked operations never produce this: they absorb out-of-range
/// indices and report exhaustion with `None`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BitArrayError {
    #[error("Slot index {index} is out of range for capacity {capacity}")]
    IndexOutOfRange { index: usize, capacity: usize },
    #[error("All {capacity} slots are occupied")]
    Exhausted { capacity: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display() {
        let err = BitArrayError::IndexOutOfRange {
            index: 12,
            capacity: 10,
        };
        assert_eq!(
            err.to_string(),
            "Slot index 12 is out of range for capacity 10"
        );

        let err = BitArrayError::Exhausted { capacity: 10 };
        assert_eq!(err.to_string(), "All 10 slots are occupied");
    }
}
