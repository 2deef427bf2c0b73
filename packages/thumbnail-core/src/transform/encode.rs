use image::DynamicImage;

use crate::errors::TransformError;

/// 画像を非可逆 WebP にエンコードする
///
/// アルファチャンネルを持つ画像は RGBA のまま、それ以外は RGB でエンコードする
pub fn encode_webp(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, TransformError> {
    let (width, height) = (img.width(), img.height());
    let quality = f32::from(quality.clamp(1, 100));

    let encoded = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        webp::Encoder::from_rgba(rgba.as_raw(), width, height).encode_simple(false, quality)
    } else {
        let rgb = img.to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), width, height).encode_simple(false, quality)
    }
    .map_err(|e| TransformError::EncodeFailed(format!("WebP encode failed: {e:?}")))?;

    if encoded.is_empty() {
        return Err(TransformError::EncodeFailed(format!(
            "WebP encoder produced no output for {width}x{height}"
        )));
    }

    Ok(encoded.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_encode_webp_rgb() {
        let img = DynamicImage::new_rgb8(10, 10);
        let data = encode_webp(&img, 80).unwrap();

        // WebP は RIFF コンテナ
        assert_eq!(&data[0..4], b"RIFF");
        assert_eq!(&data[8..12], b"WEBP");
    }

    #[test]
    fn test_encode_webp_rgba() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(12, 8, Rgba([255, 0, 0, 128])));
        let data = encode_webp(&img, 80).unwrap();

        assert_eq!(image::guess_format(&data).unwrap(), image::ImageFormat::WebP);
    }
}
