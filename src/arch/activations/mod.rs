mod act_fn;
mod linear;
mod relu;
mod sigmoid;
mod tanh;

pub use act_fn::ActFn;
pub use linear::Linear;
pub use relu::Relu;
pub use sigmoid::Sigmoid;
pub use tanh::Tanh;
