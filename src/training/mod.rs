mod stop_policy;
mod trainer;

pub use stop_policy::{StopPolicy, StopReason, ThresholdPolicy};
pub use trainer::{TrainReport, Trainer, train};
