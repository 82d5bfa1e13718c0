//! Injectable randomness for scale shuffling and quiz draws.
//!
//! Every `rand::Rng` is a [`RandomSource`], so production code passes a
//! `StdRng` (or `rand::rng()`), and tests pass a seeded `StdRng` or a
//! [`SequenceSource`] that replays scripted indices.

/// Picks indices into non-empty collections.
pub trait RandomSource {
    /// An index in `0..len`. Callers guarantee `len > 0`.
    fn next_index(&mut self, len: usize) -> usize;
}

impl<R: rand::Rng> RandomSource for R {
    fn next_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Replays a fixed list of indices, cycling when it runs out.
///
/// Each scripted value is reduced modulo the requested length, so a script
/// stays valid for any collection size.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    indices: Vec<usize>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices, cursor: 0 }
    }

    /// Number of indices handed out so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn next_index(&mut self, len: usize) -> usize {
        if self.indices.is_empty() || len == 0 {
            self.cursor += 1;
            return 0;
        }
        let value = self.indices[self.cursor % self.indices.len()];
        self.cursor += 1;
        value % len
    }
}
