pub mod activations;
mod deep_net;

pub use deep_net::DeepNet;
