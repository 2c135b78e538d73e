mod model;
mod store;

pub use model::PersistedModel;
pub use store::{from_bytes, load, save, to_bytes};
