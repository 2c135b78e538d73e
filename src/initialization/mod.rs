mod random;

pub use random::{MatrixGen, WEIGHT_HIGH, WEIGHT_LOW, rng_from_seed};
