use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::{DynamicImage, RgbImage, RgbaImage};

use crate::constants::MAX_PIXELS;
use crate::errors::TransformError;

/// 画像をリサイズする
///
/// fast_image_resize の Lanczos3 フィルタを使用する。
/// アルファチャンネルを持つ画像は RGBA8、それ以外は RGB8 で処理する
pub fn resize_image(
    img: &DynamicImage,
    target_w: u32,
    target_h: u32,
) -> Result<DynamicImage, TransformError> {
    // ピクセル数チェック
    let total_pixels = target_w as u64 * target_h as u64;
    if total_pixels > MAX_PIXELS {
        return Err(TransformError::ResolutionTooLarge {
            width: target_w,
            height: target_h,
        });
    }

    let (width, height) = (img.width(), img.height());
    let (raw, pixel_type) = if img.color().has_alpha() {
        (img.to_rgba8().into_raw(), PixelType::U8x4)
    } else {
        (img.to_rgb8().into_raw(), PixelType::U8x3)
    };

    let src_image = Image::from_vec_u8(width, height, raw, pixel_type).map_err(|e| {
        TransformError::ProcessingFailed(format!("failed to create source image: {e}"))
    })?;
    let mut dst_image = Image::new(target_w, target_h, pixel_type);

    // アルファ付き画像は乗算済みアルファで処理される（ResizeOptions のデフォルト）
    let mut resizer = Resizer::new();
    resizer
        .resize(
            &src_image,
            &mut dst_image,
            &ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3)),
        )
        .map_err(|e| TransformError::ProcessingFailed(format!("resize failed: {e}")))?;

    let resized = match pixel_type {
        PixelType::U8x4 => RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
            .map(DynamicImage::ImageRgba8),
        _ => RgbImage::from_raw(target_w, target_h, dst_image.into_vec())
            .map(DynamicImage::ImageRgb8),
    };

    resized.ok_or_else(|| {
        TransformError::ProcessingFailed("failed to convert resized image".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_resize_image() {
        let img = DynamicImage::new_rgb8(1000, 500);
        let resized = resize_image(&img, 200, 100).unwrap();

        assert_eq!(resized.width(), 200);
        assert_eq!(resized.height(), 100);
        assert!(!resized.color().has_alpha());
    }

    #[test]
    fn test_resize_keeps_alpha() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(50, 50, Rgba([0, 0, 255, 100])));
        let resized = resize_image(&img, 200, 200).unwrap();

        assert_eq!(resized.width(), 200);
        assert!(resized.color().has_alpha());
    }

    #[test]
    fn test_resize_exceeds_max_pixels() {
        let img = DynamicImage::new_rgb8(100, 100);
        let result = resize_image(&img, 100000, 100000);

        match result.unwrap_err() {
            TransformError::ResolutionTooLarge { width, height } => {
                assert_eq!(width, 100000);
                assert_eq!(height, 100000);
            }
            _ => panic!("expected ResolutionTooLarge error"),
        }
    }
}
