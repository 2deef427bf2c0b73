pub mod constants;
pub mod errors;
pub mod storage;
pub mod transform;
pub mod validation;
pub mod watermark;

// 公開API
pub use constants::{
    DEFAULT_QUALITY, MAX_DIMENSION, MAX_PIXELS, SUPPORTED_EXTENSIONS, TARGET_CONTENT_TYPE,
    TARGET_EXTENSION, THUMBNAIL_WIDTH,
};
pub use errors::{KeyError, StorageError, TransformError, WatermarkError};
pub use storage::{InMemoryObjectStore, ObjectStore, StoredObject};
pub use transform::{
    BrightnessStats, ImageTransformer, ThumbnailTransformer, TransformedImage,
    calculate_width_dimensions, decode_image, encode_webp, resize_image,
};
pub use validation::{DerivedKey, ObjectKey, SourceFormat, decode_key};
pub use watermark::{WatermarkColor, WatermarkTransformer, choose_watermark_color};
