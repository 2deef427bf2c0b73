use thiserror::Error;

/// オブジェクトキーの検証エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid URL encoding in key: {key}")]
    InvalidEncoding { key: String },

    #[error("unsupported file type ({extension})")]
    UnsupportedFormat { extension: String },
}

/// ストレージアクセスエラー
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("access denied: {bucket}/{key}")]
    Forbidden { bucket: String, key: String },

    #[error("storage error: {0}")]
    Internal(String),
}

/// 画像変換エラー
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("decode failed: {0}")]
    DecodeFailed(String),

    #[error("image resolution exceeds maximum ({width}x{height})")]
    ResolutionTooLarge { width: u32, height: u32 },

    #[error("processing failed: {0}")]
    ProcessingFailed(String),

    #[error("encode failed: {0}")]
    EncodeFailed(String),

    #[error("watermark error: {0}")]
    Watermark(#[from] WatermarkError),
}

/// ウォーターマーク生成エラー
#[derive(Debug, Error)]
pub enum WatermarkError {
    #[error("failed to load font {path}: {reason}")]
    FontLoad { path: String, reason: String },

    #[error("failed to render watermark: {0}")]
    Render(String),
}
