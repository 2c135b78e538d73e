/// Rectified linear unit, the derivative at `0` is taken as `0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Relu;

impl Relu {
    pub fn f(&self, x: f64) -> f64 {
        x.max(0.)
    }

    pub fn df(&self, x: f64) -> f64 {
        if x > 0. { 1. } else { 0. }
    }
}
