use bytes::Bytes;
use image::DynamicImage;

use crate::constants::{DEFAULT_QUALITY, MAX_DIMENSION, TARGET_CONTENT_TYPE, THUMBNAIL_WIDTH};
use crate::errors::TransformError;
use crate::transform::{calculate_width_dimensions, decode_image, encode_webp, resize_image};

/// 変換結果
#[derive(Debug, Clone)]
pub struct TransformedImage {
    pub bytes: Bytes,
    pub content_type: &'static str,
    pub width: u32,
    pub height: u32,
}

/// 元画像のバイト列からサムネイルのバイト列を作る
///
/// 実装は入力バイト列と固定値だけに依存する純粋な変換であること
pub trait ImageTransformer: Send + Sync {
    fn transform(&self, input: &[u8]) -> Result<TransformedImage, TransformError>;
}

/// 幅 [`THUMBNAIL_WIDTH`] にリサイズし WebP に変換するだけの変換
#[derive(Debug, Clone, Copy, Default)]
pub struct ThumbnailTransformer;

impl ImageTransformer for ThumbnailTransformer {
    fn transform(&self, input: &[u8]) -> Result<TransformedImage, TransformError> {
        let (img, source_format) = decode_image(input)?;
        tracing::debug!(
            format = ?source_format,
            width = img.width(),
            height = img.height(),
            "decoded source image"
        );

        let thumbnail = resize_to_thumbnail(&img)?;
        finish(&thumbnail)
    }
}

/// デコード済み画像をサムネイル幅にリサイズする
pub fn resize_to_thumbnail(img: &DynamicImage) -> Result<DynamicImage, TransformError> {
    let (src_w, src_h) = (img.width(), img.height());
    let (dst_w, dst_h) = calculate_width_dimensions(src_w, src_h, THUMBNAIL_WIDTH);
    validate_output_dimensions(dst_w, dst_h)?;

    if dst_w == src_w && dst_h == src_h {
        return Ok(img.clone());
    }
    resize_image(img, dst_w, dst_h)
}

/// WebP にエンコードして変換結果にまとめる
pub(crate) fn finish(img: &DynamicImage) -> Result<TransformedImage, TransformError> {
    let bytes = encode_webp(img, DEFAULT_QUALITY)?;

    Ok(TransformedImage {
        bytes: Bytes::from(bytes),
        content_type: TARGET_CONTENT_TYPE,
        width: img.width(),
        height: img.height(),
    })
}

/// 出力画像のサイズを検証する
fn validate_output_dimensions(width: u32, height: u32) -> Result<(), TransformError> {
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(TransformError::ResolutionTooLarge { width, height });
    }
    Ok(())
}
