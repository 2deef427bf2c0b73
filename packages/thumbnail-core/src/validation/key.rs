use std::fmt;

use crate::constants::TARGET_EXTENSION;
use crate::errors::KeyError;
use crate::validation::format::SourceFormat;

/// S3 通知のオブジェクトキーをデコードする
///
/// 通知のキーはフォームエンコードされているため、`+` を空白に置換してから
/// パーセントデコードする（`%2B` はデコード後に `+` として残る）
pub fn decode_key(raw: &str) -> Result<String, KeyError> {
    let with_spaces = raw.replace('+', " ");
    urlencoding::decode(&with_spaces)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| KeyError::InvalidEncoding {
            key: raw.to_string(),
        })
}

/// 最後の `.` 以降を拡張子として取り出す。`.` がなければ空文字
fn extension_of(key: &str) -> &str {
    key.rsplit_once('.').map_or("", |(_, ext)| ext)
}

/// デコード・検証済みのオブジェクトキー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKey {
    key: String,
    extension: String,
    format: SourceFormat,
}

impl ObjectKey {
    /// 通知の生キーをデコードして検証する
    pub fn from_raw(raw: &str) -> Result<Self, KeyError> {
        Self::parse(decode_key(raw)?)
    }

    /// デコード済みキーの拡張子を検証する
    pub fn parse(key: String) -> Result<Self, KeyError> {
        let extension = extension_of(&key).to_lowercase();
        let format = SourceFormat::from_extension(&extension)
            .ok_or_else(|| KeyError::UnsupportedFormat {
                extension: extension.clone(),
            })?;

        Ok(Self {
            key,
            extension,
            format,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// 小文字化済みの拡張子
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    /// 末尾の拡張子を出力拡張子に置き換えたキー
    pub fn derived_key(&self) -> DerivedKey {
        // 拡張子のないキーは parse で弾かれるので必ず `.` が存在する
        let stem = self
            .key
            .rsplit_once('.')
            .map_or(self.key.as_str(), |(stem, _)| stem);
        DerivedKey(format!("{stem}.{TARGET_EXTENSION}"))
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// 出力先のオブジェクトキー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedKey(String);

impl DerivedKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
