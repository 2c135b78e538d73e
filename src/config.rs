use std::{fs, path::Path, path::PathBuf, str::FromStr};

use serde::Deserialize;

use crate::{
    NetErr, Result,
    arch::{DeepNet, activations::ActFn},
    dataset::Dataset,
    initialization::rng_from_seed,
};

const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// The activation function used for the weight updates.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ActivationConfig {
    Logistic,
    Relu,
    Tanh,
    Linear { slope: f64 },
}

impl From<ActivationConfig> for ActFn {
    fn from(value: ActivationConfig) -> Self {
        match value {
            ActivationConfig::Logistic => ActFn::sigmoid(),
            ActivationConfig::Relu => ActFn::relu(),
            ActivationConfig::Tanh => ActFn::tanh(),
            ActivationConfig::Linear { slope } => ActFn::linear(slope),
        }
    }
}

/// An inline dataset, see `Dataset::new` for the layout of `data`.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    pub data: Vec<f64>,
    pub x_size: usize,
    pub y_size: usize,
    #[serde(default)]
    pub held_out: Vec<Vec<f64>>,
}

/// Everything needed to build, train and save a network.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrainConfig {
    pub layers: Vec<usize>,
    pub learning_rate: f64,
    pub activation: ActivationConfig,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    pub threshold: f64,
    #[serde(default)]
    pub seed: Option<u64>,
    pub dataset: DatasetConfig,
    pub model_path: PathBuf,
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

impl TrainConfig {
    /// Reads and validates a `TrainConfig` from a JSON file.
    ///
    /// # Errors
    /// An `InvalidConfig` error if the file can't be read, parsed or validated.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            NetErr::InvalidConfig(format!("cannot read '{}': {e}", path.display()))
        })?;

        content.parse()
    }

    pub fn act_fn(&self) -> ActFn {
        self.activation.into()
    }

    /// Builds a freshly initialized network, seeded if the config carries a seed.
    pub fn build_net(&self) -> Result<DeepNet> {
        let mut rng = rng_from_seed(self.seed);
        DeepNet::new(&self.layers, self.learning_rate, self.act_fn(), &mut rng)
    }

    pub fn build_dataset(&self) -> Result<Dataset> {
        let DatasetConfig {
            data,
            x_size,
            y_size,
            held_out,
        } = &self.dataset;

        Dataset::new(data.clone(), *x_size, *y_size)?.with_held_out(held_out.clone())
    }

    fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(NetErr::InvalidConfig(msg));

        if self.layers.len() < 2 || self.layers.contains(&0) {
            return invalid(format!(
                "layers must hold at least 2 non empty layers, got {:?}",
                self.layers
            ));
        }

        if !(self.learning_rate.is_finite() && self.learning_rate > 0.) {
            return invalid(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            ));
        }

        if let ActivationConfig::Linear { slope } = self.activation {
            if !slope.is_finite() {
                return invalid(format!("linear slope must be finite, got {slope}"));
            }
        }

        if self.max_iterations == 0 {
            return invalid("max_iterations must be positive".into());
        }

        if !(self.threshold > 0. && self.threshold <= 1.) {
            return invalid(format!(
                "threshold must be in (0, 1], got {}",
                self.threshold
            ));
        }

        let (input, output) = (self.layers[0], self.layers[self.layers.len() - 1]);
        if self.dataset.x_size != input || self.dataset.y_size != output {
            return invalid(format!(
                "dataset rows are {}+{} wide but the network maps {input} to {output}",
                self.dataset.x_size, self.dataset.y_size
            ));
        }

        if self.dataset.data.is_empty() {
            return invalid("dataset.data must not be empty".into());
        }

        Ok(())
    }
}

impl FromStr for TrainConfig {
    type Err = NetErr;

    fn from_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)
            .map_err(|e| NetErr::InvalidConfig(format!("invalid JSON: {e}")))?;

        config.validate()?;
        Ok(config)
    }
}
