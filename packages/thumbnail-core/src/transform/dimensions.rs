/// 倍率を適用して新しい寸法を計算する
fn apply_scale(src_w: u32, src_h: u32, scale: f64) -> (u32, u32) {
    let new_w = (src_w as f64 * scale).round() as u32;
    let new_h = (src_h as f64 * scale).round() as u32;

    // 最小1pxを保証
    (new_w.max(1), new_h.max(1))
}

/// 幅を固定したときの寸法を計算する
///
/// 高さはアスペクト比を維持して決まる。元画像が小さい場合は拡大する
pub fn calculate_width_dimensions(src_w: u32, src_h: u32, target_w: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (target_w.max(1), 1);
    }

    let scale = target_w as f64 / src_w as f64;
    let (_, new_h) = apply_scale(src_w, src_h, scale);

    // 丸め誤差で幅がずれないよう、幅は指定値そのものを使う
    (target_w.max(1), new_h)
}
