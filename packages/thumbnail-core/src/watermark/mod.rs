//! 明るさに応じて色を切り替えるテキストウォーターマーク
//!
//! 元画像の平均輝度が中間値より暗ければ明るいグレー、明るければ暗いグレーの
//! 半透明ラベルを 45 度傾けて描画し、サムネイルの右下に合成する。

pub mod compositor;
pub mod geometry;
pub mod text;

use std::path::Path;

use ab_glyph::FontVec;
use image::{DynamicImage, Rgba, RgbaImage};

use crate::errors::{TransformError, WatermarkError};
use crate::transform::thumbnail::finish;
use crate::transform::{
    BrightnessStats, ImageTransformer, TransformedImage, decode_image, resize_to_thumbnail,
};

pub use compositor::composite_southeast;
pub use geometry::{fit_into_box, rotate_ccw};
pub use text::render_text;

/// ウォーターマークの文言
pub const WATERMARK_LABEL: &str = "SAMPLE";

/// 文字サイズ（px）
pub const WATERMARK_FONT_SIZE: f32 = 28.0;

/// 回転角（反時計回り、度）
pub const WATERMARK_ROTATION_DEGREES: f32 = 45.0;

/// オーバーレイの枠（幅, 高さ）
pub const WATERMARK_BOX: (u32, u32) = (120, 120);

/// ウォーターマークの色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatermarkColor {
    /// 暗い画像向けの明るいグレー
    Light,
    /// 明るい画像向けの暗いグレー
    Dark,
}

impl WatermarkColor {
    pub fn rgba(&self) -> Rgba<u8> {
        match self {
            Self::Light => Rgba([211, 211, 211, 128]),
            Self::Dark => Rgba([64, 64, 64, 128]),
        }
    }
}

/// 平均輝度からウォーターマークの色を選ぶ
pub fn choose_watermark_color(stats: &BrightnessStats) -> WatermarkColor {
    if stats.is_dark() {
        WatermarkColor::Light
    } else {
        WatermarkColor::Dark
    }
}

/// サムネイル化に加えてウォーターマークを合成する変換
pub struct WatermarkTransformer {
    font: FontVec,
}

impl WatermarkTransformer {
    /// フォントデータから作成する
    pub fn new(font_data: Vec<u8>) -> Result<Self, WatermarkError> {
        let font = FontVec::try_from_vec(font_data).map_err(|e| WatermarkError::FontLoad {
            path: "<memory>".to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { font })
    }

    /// フォントファイルを読み込んで作成する
    pub fn from_file(path: &Path) -> Result<Self, WatermarkError> {
        let font_load_error = |reason: String| WatermarkError::FontLoad {
            path: path.display().to_string(),
            reason,
        };

        let data = std::fs::read(path).map_err(|e| font_load_error(e.to_string()))?;
        let font = FontVec::try_from_vec(data).map_err(|e| font_load_error(e.to_string()))?;

        tracing::info!(path = %path.display(), "loaded watermark font");
        Ok(Self { font })
    }

    /// 指定色のオーバーレイ（枠サイズ固定）を作る
    pub fn build_overlay(&self, color: WatermarkColor) -> Result<RgbaImage, WatermarkError> {
        let label = render_text(&self.font, WATERMARK_LABEL, WATERMARK_FONT_SIZE, color.rgba())?;
        let rotated = rotate_ccw(&label, WATERMARK_ROTATION_DEGREES);
        let (box_w, box_h) = WATERMARK_BOX;
        Ok(fit_into_box(&rotated, box_w, box_h))
    }
}

impl std::fmt::Debug for WatermarkTransformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatermarkTransformer").finish_non_exhaustive()
    }
}

impl ImageTransformer for WatermarkTransformer {
    fn transform(&self, input: &[u8]) -> Result<TransformedImage, TransformError> {
        let (img, _) = decode_image(input)?;

        // 色の判定はリサイズ前の元画像で行う
        let stats = BrightnessStats::from_image(&img);
        let color = choose_watermark_color(&stats);
        tracing::debug!(
            brightness = stats.average(),
            color = ?color,
            "selected watermark color"
        );

        let overlay = self.build_overlay(color)?;
        let thumbnail = resize_to_thumbnail(&img)?;

        finish(&apply_overlay(&thumbnail, &overlay))
    }
}

/// サムネイルの右下にオーバーレイを合成する
///
/// 元がアルファなしの画像は合成後も RGB に戻す
pub fn apply_overlay(thumbnail: &DynamicImage, overlay: &RgbaImage) -> DynamicImage {
    let mut rgba = thumbnail.to_rgba8();
    composite_southeast(&mut rgba, overlay);

    if thumbnail.color().has_alpha() {
        DynamicImage::ImageRgba8(rgba)
    } else {
        DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba).to_rgb8())
    }
}
