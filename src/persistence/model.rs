use serde::{Deserialize, Serialize};

use crate::{
    NetErr, Result,
    arch::{DeepNet, activations::ActFn},
    matrix,
};

/// The on-disk representation of a `DeepNet`.
///
/// The hidden cache is never persisted, a loaded network starts without one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedModel {
    pub learning_rate: f64,
    pub layers: Vec<usize>,
    pub biases: Vec<f64>,
    /// `1` logistic, `2` relu, `3` tanh, `4` linear.
    pub activation_function: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linear_slope: Option<f64>,
    /// One nested matrix per layer boundary, as rows of columns.
    pub weights: Vec<Vec<Vec<f64>>>,
}

impl PersistedModel {
    /// Checks that every parameter can be written as a JSON number.
    ///
    /// # Returns
    /// A `ModelCorrupt` error naming the first NaN or infinite parameter.
    pub fn check_finite(&self) -> Result<()> {
        let non_finite = |what: String| Err(NetErr::ModelCorrupt(format!("non finite {what}")));

        if !self.learning_rate.is_finite() {
            return non_finite(format!("learning rate {}", self.learning_rate));
        }

        if let Some(slope) = self.linear_slope.filter(|s| !s.is_finite()) {
            return non_finite(format!("linear slope {slope}"));
        }

        if let Some(i) = self.biases.iter().position(|b| !b.is_finite()) {
            return non_finite(format!("bias {i}"));
        }

        for (i, w) in self.weights.iter().enumerate() {
            if w.iter().flatten().any(|x| !x.is_finite()) {
                return non_finite(format!("weight in matrix {i}"));
            }
        }

        Ok(())
    }
}

impl From<&DeepNet> for PersistedModel {
    fn from(net: &DeepNet) -> Self {
        let act_fn = net.act_fn();

        Self {
            learning_rate: net.learning_rate(),
            layers: net.layers().to_vec(),
            biases: net.biases().to_vec(),
            activation_function: act_fn.code(),
            linear_slope: act_fn.slope(),
            weights: net
                .weights()
                .iter()
                .map(|w| matrix::to_nested(w.view()))
                .collect(),
        }
    }
}

impl TryFrom<PersistedModel> for DeepNet {
    type Error = NetErr;

    fn try_from(model: PersistedModel) -> Result<Self> {
        let act_fn = ActFn::from_code(model.activation_function, model.linear_slope)?;

        let weights = model
            .weights
            .iter()
            .enumerate()
            .map(|(i, w)| {
                matrix::from_nested(w)
                    .map_err(|e| NetErr::ModelCorrupt(format!("weight matrix {i}: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        DeepNet::from_parts(
            model.learning_rate,
            model.layers,
            model.biases,
            weights,
            act_fn,
        )
        .map_err(|e| match e {
            NetErr::ModelCorrupt(_) => e,
            other => NetErr::ModelCorrupt(other.to_string()),
        })
    }
}
