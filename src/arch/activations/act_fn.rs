use super::{Linear, Relu, Sigmoid, Tanh};
use crate::{NetErr, Result};

/// The activation kind of a network, fixed for its whole lifetime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActFn {
    Sigmoid(Sigmoid),
    Relu(Relu),
    Tanh(Tanh),
    Linear(Linear),
}

impl ActFn {
    pub fn sigmoid() -> Self {
        Self::Sigmoid(Sigmoid)
    }

    pub fn relu() -> Self {
        Self::Relu(Relu)
    }

    pub fn tanh() -> Self {
        Self::Tanh(Tanh)
    }

    pub fn linear(slope: f64) -> Self {
        Self::Linear(Linear::new(slope))
    }

    pub fn f(&self, x: f64) -> f64 {
        match self {
            Self::Sigmoid(a) => a.f(x),
            Self::Relu(a) => a.f(x),
            Self::Tanh(a) => a.f(x),
            Self::Linear(a) => a.f(x),
        }
    }

    pub fn df(&self, x: f64) -> f64 {
        match self {
            Self::Sigmoid(a) => a.df(x),
            Self::Relu(a) => a.df(x),
            Self::Tanh(a) => a.df(x),
            Self::Linear(a) => a.df(x),
        }
    }

    /// Returns the tag this activation is persisted with.
    pub fn code(&self) -> u8 {
        match self {
            Self::Sigmoid(_) => 1,
            Self::Relu(_) => 2,
            Self::Tanh(_) => 3,
            Self::Linear(_) => 4,
        }
    }

    /// Returns the slope of a linear activation, `None` for every other kind.
    pub fn slope(&self) -> Option<f64> {
        match self {
            Self::Linear(a) => Some(a.slope()),
            _ => None,
        }
    }

    /// Rebuilds an activation from its persisted tag.
    ///
    /// # Arguments
    /// * `code` - The tag, `1` logistic, `2` relu, `3` tanh and `4` linear.
    /// * `slope` - The derivative of a linear activation, required for code `4`.
    ///
    /// # Returns
    /// A `ModelCorrupt` error if the tag is unknown or a linear activation misses its slope.
    pub fn from_code(code: u8, slope: Option<f64>) -> Result<Self> {
        match (code, slope) {
            (1, _) => Ok(Self::sigmoid()),
            (2, _) => Ok(Self::relu()),
            (3, _) => Ok(Self::tanh()),
            (4, Some(slope)) => Ok(Self::linear(slope)),
            (4, None) => Err(NetErr::ModelCorrupt(
                "linear activation without a slope".into(),
            )),
            (other, _) => Err(NetErr::ModelCorrupt(format!(
                "unknown activation function {other}"
            ))),
        }
    }
}
