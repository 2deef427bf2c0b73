use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

/// 画像を中心まわりに反時計回りで回転する
///
/// キャンバスは回転後の外接矩形まで広がり、余白は透明になる。
/// サンプリングはバイリニア補間
pub fn rotate_ccw(src: &RgbaImage, degrees: f32) -> RgbaImage {
    let radians = degrees.to_radians();
    let (sin, cos) = radians.sin_cos();

    let (src_w, src_h) = (src.width() as f32, src.height() as f32);
    // 90 度などで cos が誤差を持つため、わずかに切り下げてから切り上げる
    let dst_w = (src_w * cos.abs() + src_h * sin.abs() - 1e-3).ceil().max(1.0) as u32;
    let dst_h = (src_w * sin.abs() + src_h * cos.abs() - 1e-3).ceil().max(1.0) as u32;

    let (src_cx, src_cy) = (src_w / 2.0, src_h / 2.0);
    let (dst_cx, dst_cy) = (dst_w as f32 / 2.0, dst_h as f32 / 2.0);

    RgbaImage::from_fn(dst_w, dst_h, |dx, dy| {
        // 出力座標から元画像の座標へ逆変換（y 軸下向き）
        let rx = dx as f32 + 0.5 - dst_cx;
        let ry = dy as f32 + 0.5 - dst_cy;
        let sx = rx * cos - ry * sin + src_cx - 0.5;
        let sy = rx * sin + ry * cos + src_cy - 0.5;

        sample_bilinear(src, sx, sy)
    })
}

/// 範囲外は透明として扱うバイリニア補間
fn sample_bilinear(src: &RgbaImage, x: f32, y: f32) -> Rgba<u8> {
    let (w, h) = (src.width() as i64, src.height() as i64);
    let (x0, y0) = (x.floor() as i64, y.floor() as i64);
    let (fx, fy) = (x - x0 as f32, y - y0 as f32);

    let pixel = |px: i64, py: i64| -> [f32; 4] {
        if px < 0 || py < 0 || px >= w || py >= h {
            return [0.0; 4];
        }
        let p = src.get_pixel(px as u32, py as u32);
        // 乗算済みアルファで補間し、透明部分の色がにじまないようにする
        let a = p[3] as f32 / 255.0;
        [p[0] as f32 * a, p[1] as f32 * a, p[2] as f32 * a, p[3] as f32]
    };

    let weights = [
        ((x0, y0), (1.0 - fx) * (1.0 - fy)),
        ((x0 + 1, y0), fx * (1.0 - fy)),
        ((x0, y0 + 1), (1.0 - fx) * fy),
        ((x0 + 1, y0 + 1), fx * fy),
    ];

    let mut acc = [0.0f32; 4];
    for ((px, py), weight) in weights {
        let p = pixel(px, py);
        for (a, v) in acc.iter_mut().zip(p) {
            *a += v * weight;
        }
    }

    let alpha = acc[3];
    if alpha < 0.5 {
        return Rgba([0, 0, 0, 0]);
    }
    let unpremultiply = |v: f32| (v / (alpha / 255.0)).round().clamp(0.0, 255.0) as u8;

    Rgba([
        unpremultiply(acc[0]),
        unpremultiply(acc[1]),
        unpremultiply(acc[2]),
        alpha.round().clamp(0.0, 255.0) as u8,
    ])
}

/// 画像を固定サイズの枠に収める
///
/// 枠より大きい場合はアスペクト比を維持して縮小し、枠の中央に配置する
pub fn fit_into_box(src: &RgbaImage, box_w: u32, box_h: u32) -> RgbaImage {
    let scale = (box_w as f32 / src.width() as f32)
        .min(box_h as f32 / src.height() as f32)
        .min(1.0);

    let scaled = if scale < 1.0 {
        let w = ((src.width() as f32 * scale).round() as u32).clamp(1, box_w);
        let h = ((src.height() as f32 * scale).round() as u32).clamp(1, box_h);
        imageops::resize(src, w, h, FilterType::Triangle)
    } else {
        src.clone()
    };

    let mut canvas = RgbaImage::new(box_w, box_h);
    let x = (box_w - scaled.width()) / 2;
    let y = (box_h - scaled.height()) / 2;
    imageops::overlay(&mut canvas, &scaled, x as i64, y as i64);
    canvas
}
