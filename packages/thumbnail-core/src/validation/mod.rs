pub mod format;
pub mod key;

pub use format::SourceFormat;
pub use key::{DerivedKey, ObjectKey, decode_key};
