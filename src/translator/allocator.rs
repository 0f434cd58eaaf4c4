//! Address allocators.
//!
//! An allocator hands out values from an inclusive pool, walking a cursor
//! forward and wrapping at the end of the pool. Values that are still live in
//! the translation table are skipped, so a returned value never collides with
//! an existing record.

use super::TranslationError;
use crate::address::AddressDomain;

#[derive(Debug, Clone)]
pub struct Allocator {
    domain: AddressDomain,
    first: u64,
    last: u64,
    /// Next candidate, always within `first..=last`
    cursor: u64,
}

impl Allocator {
    /// Pool `first..=last`, starting the cursor at `first`
    pub fn new(domain: AddressDomain, first: u64, last: u64) -> Self {
        Self::starting_at(domain, first, last, first)
    }

    /// Pool `first..=last`, starting the cursor at `start` (clamped into the pool)
    pub fn starting_at(domain: AddressDomain, first: u64, last: u64, start: u64) -> Self {
        debug_assert!(first <= last);
        Allocator {
            domain,
            first,
            last,
            cursor: start.clamp(first, last),
        }
    }

    pub fn domain(&self) -> AddressDomain {
        self.domain
    }

    pub fn pool_size(&self) -> u64 {
        self.last - self.first + 1
    }

    /// Allocate the next value not reported live by `is_live`.
    ///
    /// `live` is the number of values currently in use in this domain; with
    /// at most `live` values to skip, `live + 1` candidates always contain a
    /// free one unless the pool itself is full.
    pub fn allocate<F>(&mut self, live: usize, is_live: F) -> Result<u64, TranslationError>
    where
        F: Fn(u64) -> bool,
    {
        let attempts = self.pool_size().min(live as u64 + 1);
        let mut candidate = self.cursor;

        for _ in 0..attempts {
            let next = self.advance(candidate);
            if !is_live(candidate) {
                self.cursor = next;
                return Ok(candidate);
            }
            candidate = next;
        }

        Err(TranslationError::AddressSpaceExhausted { domain: self.domain })
    }

    fn advance(&self, value: u64) -> u64 {
        if value >= self.last {
            self.first
        } else {
            value + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_allocates_in_order() {
        let mut allocator = Allocator::new(AddressDomain::Short, 0, 254);
        let values: Vec<u64> = (0..3).map(|_| allocator.allocate(0, |_| false).unwrap()).collect();
        assert_eq!(values, vec![0, 1, 2]);
    }

    #[test]
    fn test_skips_live_values() {
        let live: HashSet<u64> = [0, 1, 3].into_iter().collect();
        let mut allocator = Allocator::new(AddressDomain::Short, 0, 10);

        assert_eq!(allocator.allocate(live.len(), |v| live.contains(&v)), Ok(2));
        assert_eq!(allocator.allocate(live.len(), |v| live.contains(&v)), Ok(4));
    }

    #[test]
    fn test_wraps_to_start_of_pool() {
        let mut allocator = Allocator::starting_at(AddressDomain::Short, 5, 7, 7);
        assert_eq!(allocator.allocate(0, |_| false), Ok(7));
        assert_eq!(allocator.allocate(0, |_| false), Ok(5));
    }

    #[test]
    fn test_exhaustion() {
        let mut allocator = Allocator::new(AddressDomain::Short, 0, 2);
        let result = allocator.allocate(3, |_| true);
        assert_eq!(
            result,
            Err(TranslationError::AddressSpaceExhausted { domain: AddressDomain::Short })
        );
    }

    #[test]
    fn test_live_values_outside_pool_do_not_cause_false_exhaustion() {
        // Three live values, only one of them inside the pool
        let live: HashSet<u64> = [1, 50, 60].into_iter().collect();
        let mut allocator = Allocator::new(AddressDomain::Short, 0, 1);

        assert_eq!(allocator.allocate(live.len(), |v| live.contains(&v)), Ok(0));
    }
}
