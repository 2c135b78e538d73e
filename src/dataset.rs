use ndarray::{Array1, ArrayView1};

use crate::{NetErr, Result};

/// A source of training samples and of held-out vectors for inference only evaluation.
///
/// Providers are expected to hand out vectors that are already normalized and as wide as the
/// network's input (and output, for the targets).
pub trait DatasetProvider {
    /// Returns the training inputs and their targets, in the order they should be fed.
    fn samples(&self) -> (Vec<Array1<f64>>, Vec<Array1<f64>>);

    /// Returns the vectors reserved for evaluation.
    fn held_out(&self) -> Vec<Array1<f64>> {
        Vec::new()
    }
}

/// An in-memory dataset, every row holds `x_size` input values followed by `y_size` target
/// values.
#[derive(Clone, Debug)]
pub struct Dataset {
    x_size: usize,
    y_size: usize,
    data: Vec<f64>,
    held_out: Vec<Array1<f64>>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `data` - The flattened rows.
    /// * `x_size` - The width of each input.
    /// * `y_size` - The width of each target.
    ///
    /// # Returns
    /// An `InvalidConfig` error if either width is zero, or a `DimensionMismatch` error holding
    /// the length of the trailing partial row if `data` can't be split in whole rows.
    pub fn new(data: Vec<f64>, x_size: usize, y_size: usize) -> Result<Self> {
        if x_size == 0 || y_size == 0 {
            return Err(NetErr::InvalidConfig(format!(
                "dataset widths must be positive, got x_size {x_size} and y_size {y_size}"
            )));
        }

        let row_size = x_size + y_size;
        if data.len() % row_size != 0 {
            return Err(NetErr::DimensionMismatch {
                what: "dataset trailing row",
                got: data.len() % row_size,
                expected: 0,
            });
        }

        Ok(Self {
            x_size,
            y_size,
            data,
            held_out: Vec::new(),
        })
    }

    /// Attaches held-out vectors, each one must be `x_size` wide.
    pub fn with_held_out(mut self, held_out: Vec<Vec<f64>>) -> Result<Self> {
        for row in &held_out {
            if row.len() != self.x_size {
                return Err(NetErr::DimensionMismatch {
                    what: "held-out vector",
                    got: row.len(),
                    expected: self.x_size,
                });
            }
        }

        self.held_out = held_out.into_iter().map(Array1::from).collect();
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.data.len() / (self.x_size + self.y_size)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn x_size(&self) -> usize {
        self.x_size
    }

    pub fn y_size(&self) -> usize {
        self.y_size
    }

    /// Returns an iterator over the `(x, y)` views of every row.
    pub fn rows(&self) -> impl Iterator<Item = (ArrayView1<'_, f64>, ArrayView1<'_, f64>)> {
        let x_size = self.x_size;

        self.data
            .chunks_exact(self.x_size + self.y_size)
            .map(move |row| {
                let (x, y) = row.split_at(x_size);
                (ArrayView1::from(x), ArrayView1::from(y))
            })
    }
}

impl DatasetProvider for Dataset {
    fn samples(&self) -> (Vec<Array1<f64>>, Vec<Array1<f64>>) {
        self.rows().map(|(x, y)| (x.to_owned(), y.to_owned())).unzip()
    }

    fn held_out(&self) -> Vec<Array1<f64>> {
        self.held_out.clone()
    }
}
