use log::{debug, info};
use ndarray::Array1;

use super::{StopPolicy, StopReason, ThresholdPolicy};
use crate::{NetErr, Result, arch::DeepNet};

/// The outcome of a training run.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainReport {
    /// The amount of iterations that were run.
    pub iterations: usize,
    /// The mean error of every iteration that was run, one entry per iteration, so its size is
    /// bounded by the `max_iterations` given to `Trainer::train`.
    pub errors: Vec<f64>,
    pub stop: StopReason,
}

impl TrainReport {
    /// The mean error of the last iteration, if any.
    pub fn last_error(&self) -> Option<f64> {
        self.errors.last().copied()
    }
}

/// Runs single sample online training over a dataset until its `StopPolicy` says so, or the
/// iteration budget runs out.
pub struct Trainer<P: StopPolicy = ThresholdPolicy> {
    policy: P,
}

impl Trainer<ThresholdPolicy> {
    /// Creates a new `Trainer` with the default threshold based stopping rules.
    ///
    /// # Returns
    /// An `InvalidThreshold` error if `threshold` is not in `(0, 1]`.
    pub fn new(threshold: f64) -> Result<Self> {
        if !(threshold > 0. && threshold <= 1.) {
            return Err(NetErr::InvalidThreshold(threshold));
        }

        Ok(Self::with_policy(ThresholdPolicy::new(threshold)))
    }
}

impl<P: StopPolicy> Trainer<P> {
    pub fn with_policy(policy: P) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Trains `net` calling `DeepNet::backpropagate` once per sample, in order, on every
    /// iteration.
    ///
    /// # Arguments
    /// * `net` - The network to train.
    /// * `inputs` - The input vectors.
    /// * `targets` - The expected output for each input.
    /// * `max_iterations` - The upper bound of passes over the dataset, and of the amount of
    ///   errors kept in the report.
    ///
    /// # Returns
    /// The training report, or an error raised before any iteration runs if the dataset is
    /// inconsistent with itself or with the network.
    pub fn train(
        &mut self,
        net: &mut DeepNet,
        inputs: &[Array1<f64>],
        targets: &[Array1<f64>],
        max_iterations: usize,
    ) -> Result<TrainReport> {
        validate_dataset(net, inputs, targets)?;
        self.policy.reset();

        let mut errors = Vec::with_capacity(max_iterations.min(1024));

        for iteration in 1..=max_iterations {
            let mut total = 0.;
            for (x, y) in inputs.iter().zip(targets) {
                total += net.backpropagate(x.view(), y.view())?;
            }

            let mean = total / inputs.len() as f64;
            errors.push(mean);
            debug!("iteration <{iteration}> - error <{mean}>");

            if let Some(stop) = self.policy.observe(iteration, mean) {
                match stop {
                    StopReason::Diverged => {
                        info!(iteration = iteration, error = mean; "threshold crossed")
                    }
                    _ => info!(iteration = iteration, error = mean; "maximum optimization reached"),
                }

                return Ok(TrainReport {
                    iterations: iteration,
                    errors,
                    stop,
                });
            }
        }

        info!(iterations = max_iterations; "ran every iteration");
        Ok(TrainReport {
            iterations: max_iterations,
            errors,
            stop: StopReason::MaxIterations,
        })
    }
}

/// Trains `net` with the default stopping rules.
pub fn train(
    net: &mut DeepNet,
    inputs: &[Array1<f64>],
    targets: &[Array1<f64>],
    max_iterations: usize,
    threshold: f64,
) -> Result<TrainReport> {
    Trainer::new(threshold)?.train(net, inputs, targets, max_iterations)
}

fn validate_dataset(net: &DeepNet, inputs: &[Array1<f64>], targets: &[Array1<f64>]) -> Result<()> {
    if inputs.len() != targets.len() || inputs.is_empty() {
        return Err(NetErr::InconsistentDatasetSize {
            inputs: inputs.len(),
            targets: targets.len(),
        });
    }

    for (x, y) in inputs.iter().zip(targets) {
        if x.len() != net.input_size() {
            return Err(NetErr::DimensionMismatch {
                what: "input",
                got: x.len(),
                expected: net.input_size(),
            });
        }

        if y.len() != net.output_size() {
            return Err(NetErr::DimensionMismatch {
                what: "target",
                got: y.len(),
                expected: net.output_size(),
            });
        }
    }

    Ok(())
}
