use ndarray::Array2;
use ndarray_rand::RandomExt;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::Uniform;

use crate::{NetErr, Result};

/// The inclusive lower limit of the default weight range.
pub const WEIGHT_LOW: f64 = -1.;
/// The exclusive upper limit of the default weight range.
pub const WEIGHT_HIGH: f64 = 1.;

/// A matrix generator that samples every entry independently from a uniform distribution.
///
/// The random source is borrowed, so two generators built over different rngs never share
/// state, and a seeded rng yields reproducible networks.
pub struct MatrixGen<'r, R: Rng> {
    rng: &'r mut R,
    distribution: Uniform<f64>,
}

impl<'r, R: Rng> MatrixGen<'r, R> {
    /// Creates a new `MatrixGen` over `[low, high)`.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `low` - The inclusive lower limit.
    /// * `high` - The exclusive upper limit.
    ///
    /// # Returns
    /// An error if the range is invalid (low >= high or not finite).
    pub fn new(rng: &'r mut R, low: f64, high: f64) -> Result<Self> {
        let distribution = Uniform::new(low, high)
            .map_err(|e| NetErr::InvalidConfig(format!("invalid range [{low}, {high}): {e}")))?;

        Ok(Self { rng, distribution })
    }

    /// Creates a new `MatrixGen` over the default `[-1, 1)` range.
    pub fn uniform(rng: &'r mut R) -> Result<Self> {
        Self::new(rng, WEIGHT_LOW, WEIGHT_HIGH)
    }

    /// Builds a `rows x cols` matrix of fresh samples.
    ///
    /// # Returns
    /// An `InvalidDimension` error if either dimension is zero.
    pub fn build(&mut self, rows: usize, cols: usize) -> Result<Array2<f64>> {
        if rows == 0 || cols == 0 {
            return Err(NetErr::InvalidDimension { rows, cols });
        }

        Ok(Array2::random_using(
            (rows, cols),
            &self.distribution,
            &mut *self.rng,
        ))
    }

    /// Samples a single bias scalar from `[0, 1)`.
    pub fn bias(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Returns a seeded rng if a seed is given, otherwise one seeded from the OS.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn shape_and_range() {
        let mut rng = seeded_rng();
        let mut matrix_gen = MatrixGen::uniform(&mut rng).unwrap();
        let m = matrix_gen.build(3, 5).unwrap();

        assert_eq!(m.dim(), (3, 5));
        assert!(m.iter().all(|&w| (WEIGHT_LOW..WEIGHT_HIGH).contains(&w)));
    }

    #[test]
    fn zero_dimension() {
        let mut rng = seeded_rng();
        let mut matrix_gen = MatrixGen::uniform(&mut rng).unwrap();

        assert!(matches!(
            matrix_gen.build(0, 3),
            Err(NetErr::InvalidDimension { rows: 0, cols: 3 })
        ));
        assert!(matrix_gen.build(3, 0).is_err());
    }

    #[test]
    fn same_seed_same_matrix() {
        let mut a = seeded_rng();
        let mut b = seeded_rng();

        let ma = MatrixGen::uniform(&mut a).unwrap().build(4, 4).unwrap();
        let mb = MatrixGen::uniform(&mut b).unwrap().build(4, 4).unwrap();
        assert_eq!(ma, mb);
    }

    #[test]
    fn consecutive_builds_differ() {
        let mut rng = seeded_rng();
        let mut matrix_gen = MatrixGen::uniform(&mut rng).unwrap();

        let first = matrix_gen.build(4, 4).unwrap();
        let second = matrix_gen.build(4, 4).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn custom_range() {
        let mut rng = seeded_rng();
        let mut matrix_gen = MatrixGen::new(&mut rng, 0., 0.5).unwrap();
        let m = matrix_gen.build(10, 10).unwrap();

        assert!(m.iter().all(|&w| (0.0..0.5).contains(&w)));
        assert!(MatrixGen::new(&mut seeded_rng(), 1., 1.).is_err());
    }

    #[test]
    fn bias_range() {
        let mut rng = seeded_rng();
        let mut matrix_gen = MatrixGen::uniform(&mut rng).unwrap();

        for _ in 0..100 {
            let b = matrix_gen.bias();
            assert!((0.0..1.0).contains(&b));
        }
    }
}
