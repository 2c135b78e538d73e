/// The logistic function `1 / (1 + e^-x)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sigmoid;

impl Sigmoid {
    pub fn f(&self, x: f64) -> f64 {
        1. / (1. + (-x).exp())
    }

    pub fn df(&self, x: f64) -> f64 {
        let s = self.f(x);
        s * (1. - s)
    }
}
