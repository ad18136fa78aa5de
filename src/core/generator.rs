/// Number generators — the index sources that steer a walk through a model.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("cannot choose an index below an upper bound of 0")]
    EmptyBound,
    #[error("scripted generator exhausted after {0} indices")]
    Exhausted(usize),
}

/// A source of indices in `[0, bound)`.
///
/// Well-behaved implementations stay inside the bound; callers still check,
/// since a scripted generator may hand back anything it was given.
pub trait NumberGenerator {
    fn next(&mut self, bound: usize) -> Result<usize, GeneratorError>;
}

impl<G: NumberGenerator + ?Sized> NumberGenerator for &mut G {
    fn next(&mut self, bound: usize) -> Result<usize, GeneratorError> {
        (**self).next(bound)
    }
}

impl<G: NumberGenerator + ?Sized> NumberGenerator for Box<G> {
    fn next(&mut self, bound: usize) -> Result<usize, GeneratorError> {
        (**self).next(bound)
    }
}

/// Uniform choice backed by an injected `StdRng`.
#[derive(Debug, Clone)]
pub struct RandomNumberGenerator {
    rng: StdRng,
}

impl RandomNumberGenerator {
    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Reproducible stream for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl NumberGenerator for RandomNumberGenerator {
    fn next(&mut self, bound: usize) -> Result<usize, GeneratorError> {
        if bound == 0 {
            return Err(GeneratorError::EmptyBound);
        }
        Ok(self.rng.gen_range(0..bound))
    }
}

/// Replays a fixed list of indices, ignoring the bound.
#[derive(Debug, Clone, Default)]
pub struct ListReplayGenerator {
    indices: VecDeque<usize>,
    consumed: usize,
}

impl ListReplayGenerator {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Indices not yet handed out.
    pub fn remaining(&self) -> usize {
        self.indices.len()
    }
}

impl NumberGenerator for ListReplayGenerator {
    fn next(&mut self, _bound: usize) -> Result<usize, GeneratorError> {
        let index = self
            .indices
            .pop_front()
            .ok_or(GeneratorError::Exhausted(self.consumed))?;
        self.consumed += 1;
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_stays_in_bounds() {
        let mut ng = RandomNumberGenerator::seeded(7);
        for bound in 1..50 {
            let i = ng.next(bound).unwrap();
            assert!(i < bound);
        }
    }

    #[test]
    fn random_rejects_zero_bound() {
        let mut ng = RandomNumberGenerator::seeded(7);
        assert_eq!(ng.next(0), Err(GeneratorError::EmptyBound));
    }

    #[test]
    fn seeded_is_deterministic() {
        let mut a = RandomNumberGenerator::seeded(42);
        let mut b = RandomNumberGenerator::seeded(42);
        let xs: Vec<usize> = (0..20).map(|_| a.next(1000).unwrap()).collect();
        let ys: Vec<usize> = (0..20).map(|_| b.next(1000).unwrap()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn replay_returns_list_in_order_then_exhausts() {
        let mut ng = ListReplayGenerator::new([2, 0, 5]);
        assert_eq!(ng.remaining(), 3);
        assert_eq!(ng.next(1), Ok(2));
        assert_eq!(ng.next(1), Ok(0));
        assert_eq!(ng.next(1), Ok(5));
        assert_eq!(ng.remaining(), 0);
        assert_eq!(ng.next(1), Err(GeneratorError::Exhausted(3)));
    }

    #[test]
    fn mutable_reference_is_a_generator() {
        fn take<G: NumberGenerator>(mut g: G) -> usize {
            g.next(10).unwrap()
        }
        let mut ng = ListReplayGenerator::new([4, 9]);
        assert_eq!(take(&mut ng), 4);
        assert_eq!(take(&mut ng), 9);
    }
}
