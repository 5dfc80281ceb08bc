use std::collections::HashSet;

use rand::rngs::ThreadRng;
use rand::{thread_rng, Rng};

use crate::game::Position;

/// Source of moves for an automated player.
pub trait MoveSelector {
    /// Picks one of `available`, or [`None`] when there is nothing to pick.
    fn select(&mut self, available: &HashSet<Position>) -> Option<Position>;
}

/// Selector that picks uniformly at random: every candidate comes out with
/// probability `1/n`. No state is kept between calls beyond the generator.
///
/// The generator is a type parameter so tests can inject a seeded one.
#[derive(Debug)]
pub struct RandomSelector<R = ThreadRng> {
    rng: R,
}

impl RandomSelector {
    pub fn new() -> Self {
        Self { rng: thread_rng() }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomSelector<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MoveSelector for RandomSelector<R> {
    fn select(&mut self, available: &HashSet<Position>) -> Option<Position> {
        if available.is_empty() {
            return None;
        }
        let candidates: Vec<_> = available.iter().copied().collect();
        Some(candidates[self.rng.gen_range(0..candidates.len())])
    }
}
