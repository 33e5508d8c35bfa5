use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::tween::window_progress;

// Window bounds are kept in whole thousandths of progress so each bound
// rounds once, the same way a written-out literal does.
const PER_MILLE: f64 = 1000.0;
const REVEAL_START_MILLE: usize = 750;
/// Spacing between the start of consecutive reveal windows.
const REVEAL_STEP_MILLE: usize = 30;
/// Width of a single segment's fade-in window.
const REVEAL_WINDOW_MILLE: usize = 15;

/// Session-fixed order in which text segments fade in.
///
/// `ranks[segment]` is the segment's position in the reveal cascade. The
/// order is a bijection over `0..len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealOrder {
    ranks: Vec<usize>,
}

impl RevealOrder {
    /// Builds the order from explicit ranks, rejecting anything that is not a permutation.
    pub fn from_ranks(ranks: Vec<usize>) -> Option<Self> {
        let mut seen = vec![false; ranks.len()];
        for &rank in &ranks {
            match seen.get_mut(rank) {
                Some(slot) if !*slot => *slot = true,
                _ => return None,
            }
        }
        Some(RevealOrder { ranks })
    }

    pub fn shuffled<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..count).collect();
        order.shuffle(rng);

        let mut ranks = vec![0; count];
        for (rank, segment) in order.into_iter().enumerate() {
            ranks[segment] = rank;
        }
        RevealOrder { ranks }
    }

    /// Seed built from two uniform draws in [0, 1), one per 32-bit half.
    pub fn seed_from_draws(high: f64, low: f64) -> u64 {
        let half = |draw: f64| (draw.clamp(0.0, 1.0) * f64::from(u32::MAX)) as u32;
        (u64::from(half(high)) << 32) | u64::from(half(low))
    }

    pub fn seeded(count: usize, seed: u64) -> Self {
        Self::shuffled(count, &mut SmallRng::seed_from_u64(seed))
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn rank(&self, segment: usize) -> Option<usize> {
        self.ranks.get(segment).copied()
    }

    /// Reveal window `[start, end]` for the segment holding `rank`.
    pub fn window(rank: usize) -> (f64, f64) {
        let start = REVEAL_START_MILLE + rank * REVEAL_STEP_MILLE;
        let end = start + REVEAL_WINDOW_MILLE;
        (start as f64 / PER_MILLE, end as f64 / PER_MILLE)
    }

    /// Opacity of `segment` at `progress`, following its reveal window.
    pub fn opacity(&self, segment: usize, progress: f64) -> f64 {
        match self.rank(segment) {
            Some(rank) => {
                let (start, end) = Self::window(rank);
                window_progress(start, end, progress)
            }
            None => 0.0,
        }
    }
}
