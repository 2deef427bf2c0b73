use std::path::PathBuf;

/// 出力先バケット
pub const DEST_BUCKET_ENV: &str = "DEST_BUCKET";

/// ウォーターマーク用フォントファイルのパス
pub const WATERMARK_FONT_PATH_ENV: &str = "WATERMARK_FONT_PATH";

/// フォントを置いたディレクトリ（WATERMARK_FONT_PATH がない場合に使う）
pub const FONTCONFIG_PATH_ENV: &str = "FONTCONFIG_PATH";

/// FONTCONFIG_PATH 配下のフォントファイル名
pub const WATERMARK_FONT_FILE: &str = "watermark.ttf";

/// 変換の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// リサイズのみ
    Resize,
    /// リサイズ + ウォーターマーク
    Watermark,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
}

/// ハンドラの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    pub destination_bucket: String,
    pub variant: Variant,
    /// Watermark のときのみ使用
    pub font_path: Option<PathBuf>,
}

impl HandlerConfig {
    pub fn new(destination_bucket: impl Into<String>, variant: Variant) -> Self {
        Self {
            destination_bucket: destination_bucket.into(),
            variant,
            font_path: None,
        }
    }

    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    /// 環境変数から HandlerConfig を作成する
    ///
    /// 必須の環境変数:
    /// - DEST_BUCKET
    /// - WATERMARK_FONT_PATH または FONTCONFIG_PATH（Watermark のみ）
    pub fn from_env(variant: Variant) -> Result<Self, ConfigError> {
        Self::from_lookup(variant, |name| std::env::var(name).ok())
    }

    /// 任意の参照関数から作成する。空文字は未設定として扱う
    pub fn from_lookup<F>(variant: Variant, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let destination_bucket = get(DEST_BUCKET_ENV).ok_or(ConfigError::Missing(DEST_BUCKET_ENV))?;

        let font_path = match variant {
            Variant::Resize => None,
            Variant::Watermark => {
                let path = get(WATERMARK_FONT_PATH_ENV)
                    .map(PathBuf::from)
                    .or_else(|| {
                        get(FONTCONFIG_PATH_ENV)
                            .map(|dir| PathBuf::from(dir).join(WATERMARK_FONT_FILE))
                    })
                    .ok_or(ConfigError::Missing(WATERMARK_FONT_PATH_ENV))?;
                Some(path)
            }
        };

        Ok(Self {
            destination_bucket,
            variant,
            font_path,
        })
    }
}
