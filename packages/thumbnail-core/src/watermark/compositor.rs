use image::{Rgba, RgbaImage};

/// オーバーレイを右下（southeast）に合わせて合成する
///
/// オーバーレイが合成先より大きい場合は、はみ出した部分（左上側）を切り捨てる
pub fn composite_southeast(target: &mut RgbaImage, overlay: &RgbaImage) {
    let offset_x = target.width() as i64 - overlay.width() as i64;
    let offset_y = target.height() as i64 - overlay.height() as i64;

    for (ox, oy, fg) in overlay.enumerate_pixels() {
        let tx = offset_x + ox as i64;
        let ty = offset_y + oy as i64;
        if tx < 0 || ty < 0 {
            continue;
        }

        let (tx, ty) = (tx as u32, ty as u32);
        let bg = *target.get_pixel(tx, ty);
        target.put_pixel(tx, ty, blend_over(bg, *fg));
    }
}

/// Porter-Duff "over" 演算子で前景を背景に重ねる
pub(crate) fn blend_over(background: Rgba<u8>, foreground: Rgba<u8>) -> Rgba<u8> {
    let fg_alpha = foreground[3] as f32 / 255.0;
    let bg_alpha = background[3] as f32 / 255.0;

    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);
    if out_alpha <= f32::EPSILON {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |fg: u8, bg: u8| -> u8 {
        let value = (fg as f32 * fg_alpha + bg as f32 * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        value.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        channel(foreground[0], background[0]),
        channel(foreground[1], background[1]),
        channel(foreground[2], background[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}
