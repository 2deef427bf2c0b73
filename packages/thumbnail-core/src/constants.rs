/// サムネイルの幅（px）。高さは元画像のアスペクト比に従う
pub const THUMBNAIL_WIDTH: u32 = 200;

/// 処理対象とする元画像の拡張子（小文字）
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// 出力オブジェクトの拡張子
pub const TARGET_EXTENSION: &str = "webp";

/// 出力オブジェクトの Content-Type
pub const TARGET_CONTENT_TYPE: &str = "image/webp";

/// WebP エンコード品質（1-100）
pub const DEFAULT_QUALITY: u8 = 80;

/// 出力画像の最大寸法（WebP で表現できる上限）
pub const MAX_DIMENSION: u32 = 16383;

/// 元画像の最大ピクセル数（1GP = 実質無制限、極端な攻撃のみ防止）
pub const MAX_PIXELS: u64 = 1_000_000_000;
