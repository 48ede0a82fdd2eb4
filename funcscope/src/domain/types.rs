//! Core domain types.

use serde::Serialize;

/// Resolved address range of a single function.
///
/// `low` is the first byte of the function, `high` is one past the last
/// byte, so the function occupies `[low, high)`. Constructed once per lookup
/// and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionRange {
    pub name: String,
    pub low: u64,
    pub high: u64,
}

impl FunctionRange {
    /// Check if an address falls within this function.
    #[must_use]
    pub fn contains(&self, addr: u64) -> bool {
        addr >= self.low && addr < self.high
    }

    /// Byte length of the function.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.high - self.low
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.low == self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> FunctionRange {
        FunctionRange { name: "fib".to_string(), low: 0x1000, high: 0x2000 }
    }

    #[test]
    fn test_contains() {
        let r = range();
        assert!(r.contains(0x1000));
        assert!(r.contains(0x1FFF));
        assert!(!r.contains(0x0FFF));
        assert!(!r.contains(0x2000));
    }

    #[test]
    fn test_len() {
        assert_eq!(range().len(), 0x1000);
        assert!(!range().is_empty());
    }
}
