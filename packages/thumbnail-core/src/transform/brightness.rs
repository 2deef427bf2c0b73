use image::DynamicImage;

/// 輝度の中間値（0..=255 の中点）
pub const BRIGHTNESS_MIDPOINT: f64 = 128.0;

/// 先頭3チャンネル（R, G, B）の平均輝度
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessStats {
    pub channel_means: [f64; 3],
}

impl BrightnessStats {
    /// 画像の各チャンネル平均を計算する
    ///
    /// グレースケール画像は RGB に展開してから計算するため、3チャンネルとも同じ値になる
    pub fn from_image(img: &DynamicImage) -> Self {
        let rgb = img.to_rgb8();
        let pixel_count = u64::from(rgb.width()) * u64::from(rgb.height());
        if pixel_count == 0 {
            return Self {
                channel_means: [0.0; 3],
            };
        }

        let mut sums = [0u64; 3];
        for pixel in rgb.pixels() {
            for (sum, value) in sums.iter_mut().zip(pixel.0) {
                *sum += u64::from(value);
            }
        }

        Self {
            channel_means: sums.map(|sum| sum as f64 / pixel_count as f64),
        }
    }

    /// 3チャンネル平均の平均
    pub fn average(&self) -> f64 {
        self.channel_means.iter().sum::<f64>() / 3.0
    }

    /// 中間値より暗いか
    pub fn is_dark(&self) -> bool {
        self.average() < BRIGHTNESS_MIDPOINT
    }
}
