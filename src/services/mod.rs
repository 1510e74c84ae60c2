// Service exports
pub mod dataset;
pub mod store;

pub use dataset::{Dataset, DatasetError, DatasetLoader, NA_VALUES, REQUIRED_COLUMNS};
pub use store::DatasetStore;
