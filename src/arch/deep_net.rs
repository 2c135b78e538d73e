use log::warn;
use ndarray::{Array1, Array2, ArrayView1};
use rand::Rng;

use super::activations::ActFn;
use crate::{NetErr, Result, initialization::MatrixGen, matrix};

/// A fully connected network of weighted-sum layers.
///
/// Every layer owns a single scalar bias that is broadcast over its whole activation vector, and
/// every boundary between two adjacent layers owns a `layers[i] x layers[i + 1]` weight matrix.
/// The activation function is not applied during the forward pass, it only shapes the gradient
/// used to update the weights.
#[derive(Clone, Debug)]
pub struct DeepNet {
    learning_rate: f64,
    layers: Vec<usize>,
    biases: Vec<f64>,
    weights: Vec<Array2<f64>>,
    act_fn: ActFn,

    // Forward metadata, one vector per hidden layer
    hidden: Vec<Array1<f64>>,
}

impl DeepNet {
    /// Creates a new `DeepNet` with random parameters.
    ///
    /// Biases are sampled from `[0, 1)` and weights from `[-1, 1)`.
    ///
    /// # Arguments
    /// * `layers` - The amount of neurons of each layer, the first one being the input width.
    /// * `learning_rate` - The step length of every update.
    /// * `act_fn` - The activation whose derivative drives the weight updates.
    /// * `rng` - The random source for the initial parameters.
    ///
    /// # Returns
    /// An `InvalidSchema` error if there are less than two layers, any layer is empty or the
    /// learning rate is not finite.
    pub fn new<R: Rng>(
        layers: &[usize],
        learning_rate: f64,
        act_fn: ActFn,
        rng: &mut R,
    ) -> Result<Self> {
        validate_schema(layers)?;
        validate_learning_rate(learning_rate)?;

        let mut matrix_gen = MatrixGen::uniform(rng)?;
        let biases = layers.iter().map(|_| matrix_gen.bias()).collect();
        let weights = layers
            .windows(2)
            .map(|dims| matrix_gen.build(dims[0], dims[1]))
            .collect::<Result<_>>()?;

        Ok(Self {
            learning_rate,
            layers: layers.to_vec(),
            biases,
            weights,
            act_fn,
            hidden: Vec::new(),
        })
    }

    /// Rebuilds a `DeepNet` out of existing parameters, the hidden cache starts empty.
    ///
    /// # Returns
    /// An error if the parameters don't satisfy the network's invariants.
    pub fn from_parts(
        learning_rate: f64,
        layers: Vec<usize>,
        biases: Vec<f64>,
        weights: Vec<Array2<f64>>,
        act_fn: ActFn,
    ) -> Result<Self> {
        validate_schema(&layers)?;
        validate_learning_rate(learning_rate)?;

        if biases.len() != layers.len() {
            return Err(NetErr::DimensionMismatch {
                what: "biases",
                got: biases.len(),
                expected: layers.len(),
            });
        }

        if weights.len() != layers.len() - 1 {
            return Err(NetErr::DimensionMismatch {
                what: "weight matrices",
                got: weights.len(),
                expected: layers.len() - 1,
            });
        }

        for (w, dims) in weights.iter().zip(layers.windows(2)) {
            if w.nrows() != dims[0] {
                return Err(NetErr::DimensionMismatch {
                    what: "weight matrix rows",
                    got: w.nrows(),
                    expected: dims[0],
                });
            }

            if w.ncols() != dims[1] {
                return Err(NetErr::DimensionMismatch {
                    what: "weight matrix cols",
                    got: w.ncols(),
                    expected: dims[1],
                });
            }
        }

        Ok(Self {
            learning_rate,
            layers,
            biases,
            weights,
            act_fn,
            hidden: Vec::new(),
        })
    }

    pub fn layers(&self) -> &[usize] {
        &self.layers
    }

    pub fn weights(&self) -> &[Array2<f64>] {
        &self.weights
    }

    pub fn biases(&self) -> &[f64] {
        &self.biases
    }

    pub fn act_fn(&self) -> ActFn {
        self.act_fn
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<()> {
        validate_learning_rate(learning_rate)?;
        self.learning_rate = learning_rate;
        Ok(())
    }

    /// Returns the hidden activations of the last forward pass.
    pub fn hidden(&self) -> &[Array1<f64>] {
        &self.hidden
    }

    pub fn input_size(&self) -> usize {
        self.layers[0]
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1]
    }

    /// Makes a forward pass through the network, replacing the hidden cache.
    ///
    /// # Arguments
    /// * `input` - A vector as wide as the input layer.
    ///
    /// # Returns
    /// The output of the network or a `DimensionMismatch` error.
    pub fn feed_forward(&mut self, input: ArrayView1<f64>) -> Result<Array1<f64>> {
        self.check_input(input)?;

        let (output, hidden) = self.forward_pass(input)?;
        self.hidden = hidden;
        Ok(output)
    }

    /// Makes a forward pass without touching the hidden cache.
    pub fn predict(&self, input: ArrayView1<f64>) -> Result<Array1<f64>> {
        self.check_input(input)?;
        self.forward_pass(input).map(|(output, _)| output)
    }

    /// Updates every weight and bias from a single sample.
    ///
    /// The output layer is updated with the raw error `target - output`, the delta row is then
    /// carried backwards by multiplying it with the transpose of each (already updated) weight
    /// matrix, and every shallower boundary is updated with its propagated delta.
    ///
    /// # Arguments
    /// * `input` - A vector as wide as the input layer.
    /// * `target` - The expected output, as wide as the output layer.
    ///
    /// # Returns
    /// `|Σ delta² / Σ delta| * 100`, or a `DimensionMismatch` error before anything is mutated.
    pub fn backpropagate(&mut self, input: ArrayView1<f64>, target: ArrayView1<f64>) -> Result<f64> {
        self.check_input(input)?;
        if target.len() != self.output_size() {
            return Err(NetErr::DimensionMismatch {
                what: "target",
                got: target.len(),
                expected: self.output_size(),
            });
        }

        let output = self.feed_forward(input)?;
        let delta = matrix::sub(target, output.view())?;

        let delta_sum = matrix::sum(delta.view());
        let error = delta.mapv(|d| d * d).sum() / delta_sum;

        let lr = self.learning_rate;
        let act_fn = self.act_fn;
        let n = self.weights.len();

        // hidden-output weights and bias
        update_bias(&mut self.biases[n], lr, delta.view());
        let x = if n == 1 {
            input
        } else {
            self.hidden[n - 2].view()
        };
        for ((r, c), w) in self.weights[n - 1].indexed_iter_mut() {
            *w = new_weight(delta[c], x[r], *w, lr, &act_fn);
        }

        // hidden and input-hidden weights and biases
        let mut delta_row = matrix::to_row(delta.view());
        for k in (0..n).rev() {
            let w_t = matrix::transpose(self.weights[k].view());
            delta_row = matrix::mat_mul(delta_row.view(), w_t.view())?;

            let d = delta_row.row(0);
            update_bias(&mut self.biases[k], lr, d);

            if k + 1 == n {
                continue;
            }

            let x = if k == 0 {
                input
            } else {
                self.hidden[k - 1].view()
            };
            for ((r, _), w) in self.weights[k].indexed_iter_mut() {
                *w = new_weight(d[r], x[r], *w, lr, &act_fn);
            }
        }

        let error = error.abs() * 100.;
        if !error.is_finite() {
            warn!("non finite error metric, the deltas sum up to {delta_sum}");
        }

        Ok(error)
    }

    fn check_input(&self, input: ArrayView1<f64>) -> Result<()> {
        if input.len() != self.input_size() {
            return Err(NetErr::DimensionMismatch {
                what: "input",
                got: input.len(),
                expected: self.input_size(),
            });
        }

        Ok(())
    }

    fn forward_pass(&self, input: ArrayView1<f64>) -> Result<(Array1<f64>, Vec<Array1<f64>>)> {
        let n = self.weights.len();
        let mut hidden = Vec::with_capacity(n - 1);
        let mut activation = input.to_owned();

        for (i, (w, &b)) in self.weights.iter().zip(&self.biases).enumerate() {
            activation = matrix::add_scalar(matrix::vec_mul(activation.view(), w.view())?, b);

            if i + 1 < n {
                hidden.push(activation.clone());
            }
        }

        Ok((activation, hidden))
    }
}

/// Takes one step against the gradient `-error * f'(x * w) * x`.
fn new_weight(error: f64, neuron: f64, weight: f64, lr: f64, act_fn: &ActFn) -> f64 {
    let grad = -error * act_fn.df(neuron * weight) * neuron;
    weight - lr * grad
}

/// Decrements the layer's scalar bias once per entry of the delta row.
fn update_bias(bias: &mut f64, lr: f64, delta: ArrayView1<f64>) {
    for d in delta {
        *bias -= lr * d;
    }
}

fn validate_schema(layers: &[usize]) -> Result<()> {
    if layers.len() < 2 {
        return Err(NetErr::InvalidSchema(format!(
            "expected at least 2 layers, got {}",
            layers.len()
        )));
    }

    if let Some(i) = layers.iter().position(|&size| size == 0) {
        return Err(NetErr::InvalidSchema(format!("layer {i} has no neurons")));
    }

    Ok(())
}

fn validate_learning_rate(learning_rate: f64) -> Result<()> {
    if !learning_rate.is_finite() {
        return Err(NetErr::InvalidSchema(format!(
            "learning rate must be finite, got {learning_rate}"
        )));
    }

    Ok(())
}
