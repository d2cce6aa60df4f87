//! Shuffled fair schedule for periodic events.

use rand::{Rng, seq::SliceRandom};

/// Hands out phases `0..period`, each exactly `multiplicity` times per refill,
/// in random order.
///
/// A plain `tick % period` would sweep the grid in a visible pattern; drawing
/// from a shuffled bag keeps every phase equally frequent without the rhythm.
#[derive(Debug, Clone)]
pub struct PickQueue {
    period: usize,
    multiplicity: usize,
    picks: Vec<usize>,
}

impl PickQueue {
    /// # Panics
    /// If `period` or `multiplicity` is zero.
    pub fn new(period: usize, multiplicity: usize) -> Self {
        assert!(period > 0, "pick queue period must be positive");
        assert!(multiplicity > 0, "pick queue multiplicity must be positive");
        Self {
            period,
            multiplicity,
            picks: Vec::with_capacity(period * multiplicity),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Draw the next phase, refilling and reshuffling when the bag is empty.
    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        if self.picks.is_empty() {
            self.refill(rng);
        }
        self.picks.pop().unwrap_or(0)
    }

    fn refill<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.picks.clear();
        for phase in 0..self.period {
            self.picks.extend(std::iter::repeat_n(phase, self.multiplicity));
        }
        self.picks.shuffle(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_single_window_is_fair() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut queue = PickQueue::new(4, 5);
        let mut counts = [0; 4];
        for _ in 0..20 {
            counts[queue.next(&mut rng)] += 1;
        }
        assert_eq!(counts, [5; 4]);
    }

    #[test]
    fn test_order_is_not_a_plain_cycle() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut queue = PickQueue::new(120, 5);
        let draws: Vec<usize> = (0..600).map(|_| queue.next(&mut rng)).collect();
        let cyclic: Vec<usize> = (0..600).map(|i| i % 120).collect();
        assert_ne!(draws, cyclic);
    }

    #[test]
    #[should_panic(expected = "period must be positive")]
    fn test_zero_period_panics() {
        PickQueue::new(0, 5);
    }

    proptest! {
        #[test]
        fn prop_every_window_draws_each_phase_equally(
            period in 1usize..40,
            multiplicity in 1usize..8,
            windows in 1usize..5,
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut queue = PickQueue::new(period, multiplicity);
            for _ in 0..windows {
                let mut counts = vec![0usize; period];
                for _ in 0..period * multiplicity {
                    let pick = queue.next(&mut rng);
                    prop_assert!(pick < period);
                    counts[pick] += 1;
                }
                prop_assert!(counts.iter().all(|&c| c == multiplicity));
            }
        }
    }
}
