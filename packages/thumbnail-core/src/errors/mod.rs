pub mod types;

pub use types::{KeyError, StorageError, TransformError, WatermarkError};
