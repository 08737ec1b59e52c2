// ============================================
// src/sampler.rs
// Non-repeating sampler: every item once per lap, then reshuffle
// ============================================

use std::collections::HashSet;

use crate::error::{SequencerError, SequencerResult};
use crate::rng::RandomSource;

/// Draws items from a pool in random order without repeats inside a lap.
///
/// Items are tracked by index, so two equal values in the pool are two
/// distinct items. Once every index has been drawn the next draw starts a
/// new lap.
#[derive(Debug, Clone)]
pub struct NonRepeatingSampler<T, R> {
    pool: Vec<T>,
    used: HashSet<usize>,
    pinned_first: Option<usize>, // forced first draw after a reset
    rng: R,
}

impl<T, R: RandomSource> NonRepeatingSampler<T, R> {
    /// Sampler with an empty pool. `next` fails until `reset` is called.
    pub fn new(rng: R) -> Self {
        Self {
            pool: Vec::new(),
            used: HashSet::new(),
            pinned_first: None,
            rng,
        }
    }

    pub fn with_pool(pool: Vec<T>, rng: R) -> Self {
        let mut sampler = Self::new(rng);
        sampler.pool = pool;
        sampler
    }

    /// Replaces the pool, forgets what was drawn and records the pin.
    pub fn reset(&mut self, pool: Vec<T>, pinned_first: Option<usize>) -> SequencerResult<()> {
        if let Some(index) = pinned_first {
            if index >= pool.len() {
                return Err(SequencerError::PinOutOfRange {
                    index,
                    len: pool.len(),
                });
            }
        }
        self.pool = pool;
        self.used.clear();
        self.pinned_first = pinned_first;
        Ok(())
    }

    /// Draws the next index.
    pub fn next_index(&mut self) -> SequencerResult<usize> {
        if self.pool.is_empty() {
            return Err(SequencerError::EmptyPool);
        }

        // The pin is honoured once, before any random draw.
        if let Some(index) = self.pinned_first.take() {
            if !self.used.contains(&index) {
                self.used.insert(index);
                return Ok(index);
            }
        }

        if self.used.len() == self.pool.len() {
            tracing::trace!(len = self.pool.len(), "lap complete, starting a new one");
            self.used.clear();
        }

        let available: Vec<usize> = (0..self.pool.len())
            .filter(|i| !self.used.contains(i))
            .collect();
        let chosen = available[self.rng.index(available.len())];
        self.used.insert(chosen);
        Ok(chosen)
    }

    /// Draws the next item.
    pub fn next(&mut self) -> SequencerResult<&T> {
        let index = self.next_index()?;
        Ok(&self.pool[index])
    }

    pub fn pool(&self) -> &[T] {
        &self.pool
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// How many items the current lap has handed out.
    pub fn lap_position(&self) -> usize {
        self.used.len()
    }

    /// True once every item has been drawn in the current lap.
    pub fn lap_complete(&self) -> bool {
        !self.pool.is_empty() && self.used.len() == self.pool.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedSource, seeded};

    fn sampler(n: usize, seed: u64) -> NonRepeatingSampler<usize, rand::rngs::StdRng> {
        NonRepeatingSampler::with_pool((0..n).collect(), seeded(seed))
    }

    #[test]
    fn every_index_once_per_lap() {
        for n in 2..12 {
            let mut s = sampler(n, n as u64);
            for _lap in 0..3 {
                let mut seen: Vec<usize> = (0..n).map(|_| s.next_index().unwrap()).collect();
                seen.sort();
                assert_eq!(seen, (0..n).collect::<Vec<_>>());
                assert!(s.lap_complete());
            }
        }
    }

    #[test]
    fn no_repeat_inside_a_lap() {
        let mut s = sampler(5, 99);
        let mut prev = s.next_index().unwrap();
        for _ in 1..5 {
            let cur = s.next_index().unwrap();
            assert_ne!(prev, cur);
            prev = cur;
        }
    }

    #[test]
    fn single_item_pool_repeats() {
        let mut s = NonRepeatingSampler::with_pool(vec!["hola"], seeded(1));
        for _ in 0..5 {
            assert_eq!(*s.next().unwrap(), "hola");
        }
    }

    #[test]
    fn pinned_item_comes_first() {
        for pin in 0..6 {
            let mut s = sampler(0, 3);
            s.reset((0..6).collect(), Some(pin)).unwrap();
            assert_eq!(*s.next().unwrap(), pin);
            // Pin counts as part of the first lap.
            let rest: HashSet<usize> = (0..5).map(|_| s.next_index().unwrap()).collect();
            assert!(!rest.contains(&pin));
            assert_eq!(rest.len(), 5);
        }
    }

    #[test]
    fn pin_out_of_range_is_rejected() {
        let mut s = sampler(0, 3);
        let err = s.reset(vec![1, 2], Some(2)).unwrap_err();
        assert_eq!(err, SequencerError::PinOutOfRange { index: 2, len: 2 });
    }

    #[test]
    fn empty_pool_fails() {
        let mut s: NonRepeatingSampler<u8, _> = NonRepeatingSampler::new(seeded(0));
        assert_eq!(s.next().unwrap_err(), SequencerError::EmptyPool);
    }

    #[test]
    fn duplicates_are_distinct_items() {
        // Always pick the first available index.
        let mut s =
            NonRepeatingSampler::with_pool(vec!["a", "a", "b"], ScriptedSource::new(vec![0]));
        let drawn: Vec<usize> = (0..3).map(|_| s.next_index().unwrap()).collect();
        assert_eq!(drawn, vec![0, 1, 2]);
    }

    #[test]
    fn reset_starts_a_fresh_lap() {
        let mut s = sampler(4, 11);
        s.next().unwrap();
        s.next().unwrap();
        s.reset(vec![10, 20, 30], None).unwrap();
        assert_eq!(s.lap_position(), 0);
        let mut drawn: Vec<usize> = (0..3).map(|_| *s.next().unwrap()).collect();
        drawn.sort();
        assert_eq!(drawn, vec![10, 20, 30]);
    }
}
