use serde::Deserialize;

/// S3 のアップロード通知（Lambda のトリガーペイロード）
///
/// 使用するフィールドだけを定義している
#[derive(Debug, Clone, Deserialize)]
pub struct S3NotificationEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3NotificationRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3NotificationRecord {
    #[serde(rename = "eventTime", default)]
    pub event_time: String,
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Object {
    /// URL エンコードされたキー（空白は `+`）
    pub key: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EventError {
    #[error("event contains no records")]
    NoRecords,
}

/// 1件分のアップロード通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadNotification {
    pub event_time: String,
    pub bucket: String,
    /// デコード前のキー
    pub raw_key: String,
}

impl UploadNotification {
    pub fn new(
        event_time: impl Into<String>,
        bucket: impl Into<String>,
        raw_key: impl Into<String>,
    ) -> Self {
        Self {
            event_time: event_time.into(),
            bucket: bucket.into(),
            raw_key: raw_key.into(),
        }
    }

    /// 先頭レコードだけを取り出す
    pub fn from_event(event: S3NotificationEvent) -> Result<Self, EventError> {
        let record = event
            .records
            .into_iter()
            .next()
            .ok_or(EventError::NoRecords)?;

        Ok(Self {
            event_time: record.event_time,
            bucket: record.s3.bucket.name,
            raw_key: record.s3.object.key,
        })
    }
}
