#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tanh;

impl Tanh {
    pub fn f(&self, x: f64) -> f64 {
        x.tanh()
    }

    pub fn df(&self, x: f64) -> f64 {
        1. - x.tanh().powi(2)
    }
}
