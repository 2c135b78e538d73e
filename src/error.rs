use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, NetErr>;

/// The crate's error type.
#[derive(Debug)]
pub enum NetErr {
    /// Bad layer configuration at construction time.
    InvalidSchema(String),
    /// A matrix was requested with a zero dimension.
    InvalidDimension { rows: usize, cols: usize },
    /// The amount of inputs and targets differ.
    InconsistentDatasetSize { inputs: usize, targets: usize },
    /// The stopping threshold is outside of `(0, 1]`.
    InvalidThreshold(f64),
    /// A vector or matrix width doesn't match what the operation expects.
    DimensionMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// The model source is missing or empty.
    ModelNotFound(String),
    /// The model source doesn't decode to a valid network.
    ModelCorrupt(String),
    InvalidConfig(String),
    Io(io::Error),
}

impl Display for NetErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetErr::InvalidSchema(msg) => write!(f, "invalid layer schema: {msg}"),
            NetErr::InvalidDimension { rows, cols } => {
                write!(f, "invalid matrix dimension {rows}x{cols}")
            }
            NetErr::InconsistentDatasetSize { inputs, targets } => write!(
                f,
                "inconsistency between the number of inputs ({inputs}) and targets ({targets})"
            ),
            NetErr::InvalidThreshold(threshold) => {
                write!(f, "threshold must be in (0, 1], got {threshold}")
            }
            NetErr::DimensionMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "dimension mismatch for {what}: got {got}, expected {expected}"
            ),
            NetErr::ModelNotFound(what) => write!(f, "couldn't find model: {what}"),
            NetErr::ModelCorrupt(msg) => write!(f, "corrupt model: {msg}"),
            NetErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            NetErr::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for NetErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NetErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for NetErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
