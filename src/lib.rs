pub mod arch;
pub mod config;
pub mod dataset;
pub mod error;
pub mod initialization;
pub mod matrix;
pub mod persistence;
pub mod training;

pub use arch::{DeepNet, activations::ActFn};
pub use error::{NetErr, Result};
