//! Dense matrix primitives over `ndarray` buffers.
//!
//! Vectors are treated as `1xN` rows, so a vector-matrix product is `v · m` with
//! `v.len() == m.nrows()`.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::{NetErr, Result};

fn check(what: &'static str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(NetErr::DimensionMismatch {
            what,
            got,
            expected,
        });
    }

    Ok(())
}

/// Multiplies the `1xN` row `v` by the `NxM` matrix `m`.
pub fn vec_mul(v: ArrayView1<f64>, m: ArrayView2<f64>) -> Result<Array1<f64>> {
    check("vector-matrix product", v.len(), m.nrows())?;
    Ok(v.dot(&m))
}

/// Multiplies two matrices.
pub fn mat_mul(a: ArrayView2<f64>, b: ArrayView2<f64>) -> Result<Array2<f64>> {
    check("matrix product", a.ncols(), b.nrows())?;
    Ok(a.dot(&b))
}

/// Returns an owned, standard layout transpose of `m`.
pub fn transpose(m: ArrayView2<f64>) -> Array2<f64> {
    m.t().as_standard_layout().into_owned()
}

pub fn add(a: ArrayView1<f64>, b: ArrayView1<f64>) -> Result<Array1<f64>> {
    check("elementwise add", b.len(), a.len())?;
    Ok(&a + &b)
}

pub fn sub(a: ArrayView1<f64>, b: ArrayView1<f64>) -> Result<Array1<f64>> {
    check("elementwise sub", b.len(), a.len())?;
    Ok(&a - &b)
}

/// Adds `s` to every entry of `v`.
pub fn add_scalar(mut v: Array1<f64>, s: f64) -> Array1<f64> {
    v += s;
    v
}

/// Reshapes `v` into a `1xN` row.
pub fn to_row(v: ArrayView1<f64>) -> Array2<f64> {
    v.to_owned().insert_axis(Axis(0))
}

/// Flattens `m` in row-major order.
pub fn to_flat(m: ArrayView2<f64>) -> Array1<f64> {
    m.iter().copied().collect()
}

pub fn sum(v: ArrayView1<f64>) -> f64 {
    v.sum()
}

/// Converts `m` into a vector of rows.
pub fn to_nested(m: ArrayView2<f64>) -> Vec<Vec<f64>> {
    m.rows().into_iter().map(|row| row.to_vec()).collect()
}

/// Builds a matrix out of a vector of rows.
///
/// # Returns
/// An error if there are no rows, the rows are empty or they don't share the same width.
pub fn from_nested(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let Some(first) = rows.first() else {
        return Err(NetErr::InvalidDimension { rows: 0, cols: 0 });
    };

    let ncols = first.len();
    if ncols == 0 {
        return Err(NetErr::InvalidDimension {
            rows: rows.len(),
            cols: 0,
        });
    }

    let mut flat = Vec::with_capacity(rows.len() * ncols);
    for row in rows {
        check("matrix row width", row.len(), ncols)?;
        flat.extend_from_slice(row);
    }

    Array2::from_shape_vec((rows.len(), ncols), flat).map_err(|_| NetErr::InvalidDimension {
        rows: rows.len(),
        cols: ncols,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn vector_times_matrix() {
        let v = arr1(&[1., 2.]);
        let m = arr2(&[[1., 2., 3.], [4., 5., 6.]]);

        assert_eq!(vec_mul(v.view(), m.view()).unwrap(), arr1(&[9., 12., 15.]));
    }

    #[test]
    fn vector_times_matrix_mismatch() {
        let v = arr1(&[1., 2., 3.]);
        let m = arr2(&[[1., 2.], [3., 4.]]);

        assert!(matches!(
            vec_mul(v.view(), m.view()),
            Err(NetErr::DimensionMismatch {
                got: 3,
                expected: 2,
                ..
            })
        ));
    }

    #[test]
    fn matrix_times_matrix() {
        let a = arr2(&[[1., 2.]]);
        let b = arr2(&[[1., 0., 2.], [0., 1., 3.]]);

        assert_eq!(mat_mul(a.view(), b.view()).unwrap(), arr2(&[[1., 2., 8.]]));
        assert!(mat_mul(b.view(), b.view()).is_err());
    }

    #[test]
    fn transpose_swaps_axes() {
        let m = arr2(&[[1., 2., 3.], [4., 5., 6.]]);
        let t = transpose(m.view());

        assert_eq!(t, arr2(&[[1., 4.], [2., 5.], [3., 6.]]));
        assert!(t.is_standard_layout());
    }

    #[test]
    fn elementwise_and_reductions() {
        let a = arr1(&[1., 2., 3.]);
        let b = arr1(&[0.5, 0.5, 0.5]);

        assert_eq!(add(a.view(), b.view()).unwrap(), arr1(&[1.5, 2.5, 3.5]));
        assert_eq!(sub(a.view(), b.view()).unwrap(), arr1(&[0.5, 1.5, 2.5]));
        assert_eq!(add_scalar(a.clone(), 1.), arr1(&[2., 3., 4.]));
        assert_eq!(sum(a.view()), 6.);
        assert!(sub(a.view(), arr1(&[1.]).view()).is_err());
    }

    #[test]
    fn reshapes() {
        let v = arr1(&[1., 2., 3.]);
        assert_eq!(to_row(v.view()), arr2(&[[1., 2., 3.]]));

        let m = arr2(&[[1., 2.], [3., 4.]]);
        assert_eq!(to_flat(m.view()), arr1(&[1., 2., 3., 4.]));
    }

    #[test]
    fn nested_conversions() {
        let m = arr2(&[[1., 2.], [3., 4.], [5., 6.]]);
        let nested = to_nested(m.view());

        assert_eq!(nested, vec![vec![1., 2.], vec![3., 4.], vec![5., 6.]]);
        assert_eq!(from_nested(&nested).unwrap(), m);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let ragged = vec![vec![1., 2.], vec![3.]];
        assert!(from_nested(&ragged).is_err());
        assert!(from_nested(&[]).is_err());
        assert!(from_nested(&[vec![]]).is_err());
    }
}
