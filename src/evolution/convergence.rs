//! Stagnation tracking for the evolution loop.
//!
//! A generation is stagnant when the previous generation already had a
//! positive best fitness at least as high as this one. Equal fitness counts:
//! elitism makes regression impossible, so "no change" is the stall signal.

/// Why a run stopped.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Best fitness stalled for `convergence_window` consecutive generations.
    Converged,
    /// The generation budget was used up.
    BudgetExhausted,
    /// A generation reached the configured target fitness.
    TargetReached,
    /// The cancellation token was set.
    Cancelled,
}

/// Tracks the best fitness seen and the length of the current stall.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceTracker {
    window: usize,
    historical_best: f64,
    last_best: f64,
    stagnant_generations: usize,
}

impl ConvergenceTracker {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            historical_best: 0.0,
            last_best: 0.0,
            stagnant_generations: 0,
        }
    }

    /// Records the best fitness of a generation and reports whether the run
    /// has converged.
    ///
    /// The first observation never counts as stagnant because there is no
    /// positive previous best to compare with.
    pub fn observe(&mut self, generation_best: f64) -> bool {
        self.historical_best = self.historical_best.max(generation_best);

        if self.last_best > 0.0 && self.last_best >= generation_best {
            self.stagnant_generations += 1;
        } else {
            self.stagnant_generations = 0;
        }

        self.stagnant_generations >= self.window
    }

    /// Commits `generation_best` as the baseline for the next observation.
    ///
    /// Called only when the run continues past the current generation.
    pub fn advance(&mut self, generation_best: f64) {
        self.last_best = generation_best;
    }

    pub fn historical_best(&self) -> f64 {
        self.historical_best
    }

    pub fn stagnant_generations(&self) -> usize {
        self.stagnant_generations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(tracker: &mut ConvergenceTracker, bests: &[f64]) -> Option<usize> {
        for (generation, &best) in bests.iter().enumerate() {
            if tracker.observe(best) {
                return Some(generation);
            }
            tracker.advance(best);
        }
        None
    }

    #[test]
    fn test_converges_exactly_at_window() {
        let mut tracker = ConvergenceTracker::new(3);
        // improvement at 0 and 1, then three flat generations
        assert_eq!(run(&mut tracker, &[1.0, 2.0, 2.0, 2.0, 2.0, 2.0]), Some(4));
        assert_eq!(tracker.stagnant_generations(), 3);
        assert_eq!(tracker.historical_best(), 2.0);
    }

    #[test]
    fn test_improvement_resets_stall() {
        let mut tracker = ConvergenceTracker::new(2);
        assert_eq!(run(&mut tracker, &[1.0, 1.0, 1.5, 1.5, 1.7, 1.7]), None);
        assert_eq!(tracker.stagnant_generations(), 1);
    }

    #[test]
    fn test_zero_fitness_never_stagnates() {
        let mut tracker = ConvergenceTracker::new(1);
        assert_eq!(run(&mut tracker, &[0.0; 10]), None);
        assert_eq!(tracker.stagnant_generations(), 0);
    }

    #[test]
    fn test_regression_counts_as_stagnant() {
        let mut tracker = ConvergenceTracker::new(1);
        assert_eq!(run(&mut tracker, &[3.0, 2.0]), Some(1));
        assert_eq!(tracker.historical_best(), 3.0);
    }

    #[test]
    fn test_first_generation_is_never_stagnant() {
        let mut tracker = ConvergenceTracker::new(1);
        assert!(!tracker.observe(5.0));
    }
}
