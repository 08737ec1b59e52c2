// ============================================
// src/session.rs
// Session wrapper: one content source plus the item on screen
// ============================================

use crate::error::SequencerResult;
use crate::filter::{Combo, ConstraintFilter};
use crate::rng::RandomSource;
use crate::sampler::NonRepeatingSampler;

/// Anything that can hand out the next piece of content.
pub trait Draw {
    type Item;

    fn draw(&mut self) -> SequencerResult<Self::Item>;
}

impl<T: Clone, R: RandomSource> Draw for NonRepeatingSampler<T, R> {
    type Item = T;

    fn draw(&mut self) -> SequencerResult<T> {
        self.next().cloned()
    }
}

impl<T: Clone + PartialEq, R: RandomSource> Draw for ConstraintFilter<T, R> {
    type Item = Combo<T>;

    fn draw(&mut self) -> SequencerResult<Combo<T>> {
        self.generate()
    }
}

/// Tracks the current item of one activity run.
///
/// A fresh `Session` is created whenever the player starts or switches an
/// activity; nothing survives the session.
pub struct Session<S: Draw> {
    source: S,
    current: Option<S::Item>,
}

impl<S: Draw> Session<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: None,
        }
    }

    /// Draws the first item.
    pub fn start(&mut self) -> SequencerResult<&S::Item> {
        self.current = None;
        self.advance()
    }

    pub fn current(&self) -> Option<&S::Item> {
        self.current.as_ref()
    }

    /// Draws the next item. On failure the previous item stays current.
    pub fn advance(&mut self) -> SequencerResult<&S::Item> {
        let item = self.source.draw()?;
        Ok(self.current.insert(item))
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<T: Clone, R: RandomSource> Session<NonRepeatingSampler<T, R>> {
    /// Resets the sampler with a new pool and draws the first item.
    pub fn start_or_reset(
        &mut self,
        pool: Vec<T>,
        pinned_first: Option<usize>,
    ) -> SequencerResult<&T> {
        self.current = None;
        self.source.reset(pool, pinned_first)?;
        self.advance()
    }
}
