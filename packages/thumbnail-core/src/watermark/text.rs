use ab_glyph::{Font, GlyphId, PxScale, PxScaleFont, ScaleFont, point};
use image::{Rgba, RgbaImage};

use crate::errors::WatermarkError;
use crate::watermark::compositor::blend_over;

/// テキストを透明背景の RGBA 画像に描画する
///
/// 色のアルファ値はグリフのカバレッジに掛け合わされる
pub fn render_text<F: Font>(
    font: &F,
    text: &str,
    px_size: f32,
    color: Rgba<u8>,
) -> Result<RgbaImage, WatermarkError> {
    if text.is_empty() {
        return Err(WatermarkError::Render("label is empty".to_string()));
    }

    let scale = PxScale::from(px_size);
    let scaled_font = font.as_scaled(scale);

    let (width, height) = measure(&scaled_font, text);
    let mut canvas = RgbaImage::new(width, height);

    let baseline_y = scaled_font.ascent();
    let mut cursor_x = 0.0f32;
    let mut prev_glyph: Option<GlyphId> = None;

    for c in text.chars() {
        let glyph_id = scaled_font.glyph_id(c);
        if let Some(prev) = prev_glyph {
            cursor_x += scaled_font.kern(prev, glyph_id);
        }

        let glyph = glyph_id.with_scale_and_position(scale, point(cursor_x, baseline_y));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let x = px as i32 + bounds.min.x as i32;
                let y = py as i32 + bounds.min.y as i32;
                if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                    return;
                }

                let alpha = (coverage.clamp(0.0, 1.0) * color[3] as f32).round() as u8;
                let fg = Rgba([color[0], color[1], color[2], alpha]);
                let existing = *canvas.get_pixel(x as u32, y as u32);
                canvas.put_pixel(x as u32, y as u32, blend_over(existing, fg));
            });
        }

        cursor_x += scaled_font.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    Ok(canvas)
}

/// 描画に必要なキャンバスの大きさ
fn measure<F: Font>(scaled_font: &PxScaleFont<&F>, text: &str) -> (u32, u32) {
    let mut width = 0.0f32;
    let mut prev_glyph: Option<GlyphId> = None;

    for c in text.chars() {
        let glyph_id = scaled_font.glyph_id(c);
        if let Some(prev) = prev_glyph {
            width += scaled_font.kern(prev, glyph_id);
        }
        width += scaled_font.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    // アンチエイリアスの余白
    let padding = 2;
    (
        width.ceil().max(1.0) as u32 + padding,
        scaled_font.height().ceil().max(1.0) as u32 + padding,
    )
}
