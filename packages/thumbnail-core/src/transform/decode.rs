use std::io::Cursor;

use image::{DynamicImage, ImageFormat, ImageReader};

use crate::constants::MAX_PIXELS;
use crate::errors::TransformError;

/// 画像バイト列をデコードし、DynamicImage と推測したフォーマットを返す
///
/// フォーマットは拡張子ではなく先頭バイトから判定する
pub fn decode_image(input: &[u8]) -> Result<(DynamicImage, Option<ImageFormat>), TransformError> {
    let reader = ImageReader::new(Cursor::new(input))
        .with_guessed_format()
        .map_err(|e| TransformError::DecodeFailed(format!("failed to guess format: {e}")))?;

    let source_format = reader.format();

    let img = reader
        .decode()
        .map_err(|e| TransformError::DecodeFailed(e.to_string()))?;

    validate_source_dimensions(img.width(), img.height())?;

    Ok((img, source_format))
}

/// ソース画像の総ピクセル数を検証し、メモリ枯渇を防ぐ
fn validate_source_dimensions(width: u32, height: u32) -> Result<(), TransformError> {
    let total_pixels = width as u64 * height as u64;
    if total_pixels > MAX_PIXELS {
        return Err(TransformError::ResolutionTooLarge { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([10, 20, 30])));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let (img, format) = decode_image(&png_bytes(40, 30)).unwrap();
        assert_eq!(img.width(), 40);
        assert_eq!(img.height(), 30);
        assert_eq!(format, Some(ImageFormat::Png));
    }

    #[test]
    fn test_decode_garbage() {
        let result = decode_image(b"definitely not an image");
        assert!(matches!(result, Err(TransformError::DecodeFailed(_))));
    }

    #[test]
    fn test_validate_source_dimensions() {
        assert!(validate_source_dimensions(4000, 3000).is_ok());
        assert!(matches!(
            validate_source_dimensions(100_000, 100_000),
            Err(TransformError::ResolutionTooLarge {
                width: 100_000,
                height: 100_000
            })
        ));
    }
}
