pub mod brightness;
pub mod decode;
pub mod dimensions;
pub mod encode;
pub mod resize;
pub mod thumbnail;

pub use brightness::{BRIGHTNESS_MIDPOINT, BrightnessStats};
pub use decode::decode_image;
pub use dimensions::calculate_width_dimensions;
pub use encode::encode_webp;
pub use resize::resize_image;
pub use thumbnail::{ImageTransformer, ThumbnailTransformer, TransformedImage, resize_to_thumbnail};
