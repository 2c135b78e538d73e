/// Why a training run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The mean error got below the policy's target.
    Converged,
    /// The mean error jumped up further than the policy tolerates.
    Diverged,
    /// Every iteration was run.
    MaxIterations,
}

/// Decides when a training run should stop early.
pub trait StopPolicy {
    /// Clears any state kept from a previous run.
    fn reset(&mut self);

    /// Observes the mean error of an iteration.
    ///
    /// # Arguments
    /// * `iteration` - The 1-based iteration number.
    /// * `mean_error` - The mean error metric over the whole dataset for this iteration.
    ///
    /// # Returns
    /// `Some` reason if training should stop after this iteration.
    fn observe(&mut self, iteration: usize, mean_error: f64) -> Option<StopReason>;
}

/// Stops when the error jumps up by more than `threshold * 100` between two iterations, or as
/// soon as it falls under `threshold * 10`.
#[derive(Clone, Debug)]
pub struct ThresholdPolicy {
    threshold: f64,
    previous: Option<f64>,
}

impl ThresholdPolicy {
    /// Creates a new `ThresholdPolicy`, `threshold` should be in `(0, 1]`.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            previous: None,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl StopPolicy for ThresholdPolicy {
    fn reset(&mut self) {
        self.previous = None;
    }

    fn observe(&mut self, _iteration: usize, mean_error: f64) -> Option<StopReason> {
        if let Some(previous) = self.previous {
            if mean_error > previous && mean_error - previous > self.threshold * 100. {
                return Some(StopReason::Diverged);
            }
        }

        self.previous = Some(mean_error);

        if mean_error < self.threshold * 10. {
            return Some(StopReason::Converged);
        }

        None
    }
}
