/// The identity function.
///
/// Its derivative is not `1` but a caller supplied `slope`, models trained with a linear
/// activation depend on that constant inside the weight update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Linear {
    slope: f64,
}

impl Linear {
    pub fn new(slope: f64) -> Self {
        Self { slope }
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn f(&self, x: f64) -> f64 {
        x
    }

    pub fn df(&self, _x: f64) -> f64 {
        self.slope
    }
}
