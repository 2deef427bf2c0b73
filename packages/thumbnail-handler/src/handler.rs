use lambda_runtime::LambdaEvent;
use serde::Serialize;

use crate::config::HandlerConfig;
use crate::event::{EventError, S3NotificationEvent, UploadNotification};
use thumbnail_core::{
    ImageTransformer, KeyError, ObjectKey, ObjectStore, StorageError, TransformError, decode_key,
};

/// 成功時に呼び出し元へ返すレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("invalid event: {0}")]
    Event(#[from] EventError),

    #[error("invalid key: {0}")]
    Key(#[from] KeyError),

    #[error("failed to read source object: {0}")]
    Fetch(#[source] StorageError),

    #[error("failed to transform image: {0}")]
    Transform(#[from] TransformError),

    #[error("failed to write thumbnail: {0}")]
    Store(#[source] StorageError),
}

/// 1回の呼び出しの結果
#[derive(Debug)]
pub enum Outcome {
    Completed(HandlerResponse),
    /// 対象外の拡張子
    Skipped { extension: String },
    Failed(HandlerError),
}

impl Outcome {
    /// プラットフォームへ返す値。完了以外は何も返さない
    pub fn into_response(self) -> Option<HandlerResponse> {
        match self {
            Outcome::Completed(response) => Some(response),
            Outcome::Skipped { .. } | Outcome::Failed(_) => None,
        }
    }
}

/// アップロード通知を受けてサムネイルを書き出すハンドラ
pub struct ThumbnailHandler<S, T> {
    config: HandlerConfig,
    store: S,
    transformer: T,
}

impl<S: ObjectStore, T: ImageTransformer> ThumbnailHandler<S, T> {
    pub fn new(config: HandlerConfig, store: S, transformer: T) -> Self {
        Self {
            config,
            store,
            transformer,
        }
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lambda ランタイムから呼ばれる入口
    ///
    /// 失敗してもエラーは返さず、ログに残したうえで `None` を返す
    pub async fn handle_event(
        &self,
        event: LambdaEvent<S3NotificationEvent>,
    ) -> Result<Option<HandlerResponse>, lambda_runtime::Error> {
        let (payload, context) = event.into_parts();
        tracing::debug!(request_id = %context.request_id, "received upload notification");

        let outcome = match UploadNotification::from_event(payload) {
            Ok(notification) => self.run(&notification).await,
            Err(e) => {
                tracing::error!(error = %e, "invalid event payload");
                Outcome::Failed(e.into())
            }
        };

        Ok(outcome.into_response())
    }

    /// キー検証 → 取得 → 変換 → 保存 を順に実行する
    pub async fn run(&self, notification: &UploadNotification) -> Outcome {
        let decoded = match decode_key(&notification.raw_key) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::error!(key = %notification.raw_key, error = %e, "failed to decode key");
                return Outcome::Failed(e.into());
            }
        };

        tracing::info!(
            "{} - {}/{}",
            notification.event_time,
            notification.bucket,
            decoded
        );

        let key = match ObjectKey::parse(decoded) {
            Ok(key) => key,
            Err(KeyError::UnsupportedFormat { extension }) => {
                tracing::warn!(extension = %extension, "unsupported file type ({extension})");
                return Outcome::Skipped { extension };
            }
            Err(e) => return Outcome::Failed(e.into()),
        };

        match self.process(&notification.bucket, &key).await {
            Ok(response) => {
                tracing::info!("{}", response.body);
                Outcome::Completed(response)
            }
            Err(e) => {
                tracing::error!(
                    bucket = %notification.bucket,
                    key = %key,
                    error = %e,
                    "failed to create thumbnail"
                );
                Outcome::Failed(e)
            }
        }
    }

    async fn process(&self, bucket: &str, key: &ObjectKey) -> Result<HandlerResponse, HandlerError> {
        let derived_key = key.derived_key();
        let destination = &self.config.destination_bucket;

        tracing::debug!(bucket = %bucket, key = %key, "fetching source object");
        let source = self
            .store
            .get_object(bucket, key.as_str())
            .await
            .map_err(HandlerError::Fetch)?;

        tracing::debug!(
            key = %key,
            size = source.body.len(),
            content_type = ?source.content_type,
            variant = ?self.config.variant,
            "transforming image"
        );
        let output = self.transformer.transform(&source.body)?;

        self.store
            .put_object(destination, derived_key.as_str(), output.bytes, output.content_type)
            .await
            .map_err(HandlerError::Store)?;

        Ok(HandlerResponse {
            status_code: 200,
            body: format!(
                "Successfully resized {bucket}/{key} and uploaded to {destination}/{derived_key}"
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use bytes::Bytes;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use lambda_runtime::Context;
    use std::io::Cursor;
    use thumbnail_core::{
        InMemoryObjectStore, ThumbnailTransformer, TransformedImage, WatermarkTransformer,
    };

    const DEST: &str = "thumbs";

    const FONT: &[u8] = include_bytes!("../../thumbnail-core/tests/fixtures/DejaVuSans.ttf");

    /// 入力を見ずに固定のバイト列を返す
    struct FixedTransformer;

    impl ImageTransformer for FixedTransformer {
        fn transform(&self, _input: &[u8]) -> Result<TransformedImage, TransformError> {
            Ok(TransformedImage {
                bytes: Bytes::from_static(b"RIFF....WEBP"),
                content_type: "image/webp",
                width: 200,
                height: 100,
            })
        }
    }

    struct FailingTransformer;

    impl ImageTransformer for FailingTransformer {
        fn transform(&self, _input: &[u8]) -> Result<TransformedImage, TransformError> {
            Err(TransformError::DecodeFailed("corrupt".to_string()))
        }
    }

    fn handler<T: ImageTransformer>(transformer: T) -> ThumbnailHandler<InMemoryObjectStore, T> {
        ThumbnailHandler::new(
            HandlerConfig::new(DEST, Variant::Resize),
            InMemoryObjectStore::new(),
            transformer,
        )
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([90, 160, 30])));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[tokio::test]
    async fn test_completed() {
        let handler = handler(FixedTransformer);
        handler
            .store()
            .insert("src", "photo one.JPG", vec![0xFFu8, 0xD8], Some("image/jpeg"))
            .await;

        let notification = UploadNotification::new("2024-05-01T00:00:00.000Z", "src", "photo+one.JPG");
        let outcome = handler.run(&notification).await;

        let response = outcome.into_response().unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.body,
            "Successfully resized src/photo one.JPG and uploaded to thumbs/photo one.webp"
        );

        let written = handler.store().get(DEST, "photo one.webp").await.unwrap();
        assert_eq!(written.body.as_ref(), b"RIFF....WEBP");
        assert_eq!(written.content_type.as_deref(), Some("image/webp"));
    }

    #[tokio::test]
    async fn test_unsupported_extension_is_skipped() {
        let handler = handler(FixedTransformer);
        handler.store().insert("src", "notes.txt", b"hello".to_vec(), None).await;

        let outcome = handler.run(&UploadNotification::new("t", "src", "notes.txt")).await;

        assert!(matches!(&outcome, Outcome::Skipped { extension } if extension == "txt"));
        assert!(outcome.into_response().is_none());
        assert!(handler.store().keys(DEST).await.is_empty());
    }

    #[tokio::test]
    async fn test_key_without_extension_is_skipped() {
        let handler = handler(FixedTransformer);
        handler.store().insert("src", "jpg", png_bytes(4, 4), None).await;

        let outcome = handler.run(&UploadNotification::new("t", "src", "jpg")).await;

        assert!(matches!(&outcome, Outcome::Skipped { extension } if extension.is_empty()));
        assert!(handler.store().keys(DEST).await.is_empty());
    }

    #[tokio::test]
    async fn test_access_denied_fails_without_write() {
        let handler = handler(FixedTransformer);
        handler.store().insert("src", "a.png", png_bytes(4, 4), None).await;
        handler.store().deny_read("src").await;

        let outcome = handler.run(&UploadNotification::new("t", "src", "a.png")).await;

        assert!(matches!(
            outcome,
            Outcome::Failed(HandlerError::Fetch(StorageError::Forbidden { .. }))
        ));
        assert!(handler.store().keys(DEST).await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_source_fails() {
        let handler = handler(FixedTransformer);

        let outcome = handler.run(&UploadNotification::new("t", "src", "gone.jpeg")).await;

        assert!(matches!(
            outcome,
            Outcome::Failed(HandlerError::Fetch(StorageError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_transform_failure() {
        let handler = handler(FailingTransformer);
        handler.store().insert("src", "a.jpg", b"not a jpeg".to_vec(), None).await;

        let outcome = handler.run(&UploadNotification::new("t", "src", "a.jpg")).await;

        assert!(matches!(outcome, Outcome::Failed(HandlerError::Transform(_))));
        assert!(handler.store().keys(DEST).await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_key_encoding() {
        let handler = handler(FixedTransformer);

        let outcome = handler.run(&UploadNotification::new("t", "src", "bad%FF.jpg")).await;

        assert!(matches!(outcome, Outcome::Failed(HandlerError::Key(_))));
    }

    #[tokio::test]
    async fn test_end_to_end_thumbnail() {
        let handler = handler(ThumbnailTransformer);
        handler
            .store()
            .insert("src", "2024/holiday photo.png", png_bytes(640, 480), Some("image/png"))
            .await;

        let notification = UploadNotification::new("t", "src", "2024/holiday+photo.png");
        let outcome = handler.run(&notification).await;
        assert!(matches!(outcome, Outcome::Completed(_)));

        let written = handler.store().get(DEST, "2024/holiday photo.webp").await.unwrap();
        let decoded = image::load_from_memory(&written.body).unwrap();
        assert_eq!(image::guess_format(&written.body).unwrap(), ImageFormat::WebP);
        assert_eq!(decoded.width(), 200);
        assert_eq!(decoded.height(), 150);
    }

    #[tokio::test]
    async fn test_end_to_end_watermark() {
        let handler = ThumbnailHandler::new(
            HandlerConfig::new(DEST, Variant::Watermark),
            InMemoryObjectStore::new(),
            WatermarkTransformer::new(FONT.to_vec()).unwrap(),
        );
        handler.store().insert("src", "night.png", png_bytes(800, 600), None).await;

        let outcome = handler.run(&UploadNotification::new("t", "src", "night.png")).await;
        assert!(matches!(outcome, Outcome::Completed(_)));

        let written = handler.store().get(DEST, "night.webp").await.unwrap();
        assert_eq!(written.content_type.as_deref(), Some("image/webp"));

        let decoded = image::load_from_memory(&written.body).unwrap().to_rgb8();
        assert_eq!((decoded.width(), decoded.height()), (200, 150));
        // 元画像は暗いので右下にだけ明るいグレーが乗る
        let source = luma(&Rgb([90, 160, 30]));
        let brightened = (80..200)
            .flat_map(|x| (30..150).map(move |y| (x, y)))
            .filter(|&(x, y)| luma(decoded.get_pixel(x, y)) - source > 30)
            .count();
        assert!(brightened > 100, "brightened pixels: {brightened}");
        assert!((luma(decoded.get_pixel(0, 0)) - source).abs() <= 8);
    }

    fn luma(pixel: &Rgb<u8>) -> i32 {
        pixel.0.iter().map(|&c| i32::from(c)).sum::<i32>() / 3
    }

    fn lambda_event(payload: serde_json::Value) -> LambdaEvent<S3NotificationEvent> {
        LambdaEvent::new(serde_json::from_value(payload).unwrap(), Context::default())
    }

    #[tokio::test]
    async fn test_handle_event_completed() {
        let handler = handler(FixedTransformer);
        handler.store().insert("src", "photo one.JPG", vec![0xFFu8, 0xD8], None).await;

        let event = lambda_event(serde_json::json!({
            "Records": [{
                "eventTime": "2024-05-01T00:00:00.000Z",
                "s3": {
                    "bucket": { "name": "src" },
                    "object": { "key": "photo+one.JPG" }
                }
            }]
        }));
        let response = handler.handle_event(event).await.unwrap();

        assert_eq!(
            response,
            Some(HandlerResponse {
                status_code: 200,
                body: "Successfully resized src/photo one.JPG and uploaded to thumbs/photo one.webp"
                    .to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_handle_event_returns_none() {
        let handler = handler(FixedTransformer);

        // レコードなし
        let response = handler
            .handle_event(lambda_event(serde_json::json!({ "Records": [] })))
            .await
            .unwrap();
        assert_eq!(response, None);

        // 対象外の拡張子
        let event = lambda_event(serde_json::json!({
            "Records": [{
                "eventTime": "t",
                "s3": { "bucket": { "name": "src" }, "object": { "key": "notes.txt" } }
            }]
        }));
        assert_eq!(handler.handle_event(event).await.unwrap(), None);

        // 取得失敗
        let event = lambda_event(serde_json::json!({
            "Records": [{
                "eventTime": "t",
                "s3": { "bucket": { "name": "src" }, "object": { "key": "gone.png" } }
            }]
        }));
        assert_eq!(handler.handle_event(event).await.unwrap(), None);
        assert!(handler.store().keys(DEST).await.is_empty());
    }

    #[test]
    fn test_response_serialization() {
        let response = HandlerResponse {
            status_code: 200,
            body: "ok".to_string(),
        };
        assert_eq!(
            serde_json::to_value(Some(response)).unwrap(),
            serde_json::json!({ "statusCode": 200, "body": "ok" })
        );
        assert_eq!(
            serde_json::to_value(Outcome::Skipped { extension: "txt".to_string() }.into_response())
                .unwrap(),
            serde_json::Value::Null
        );
    }
}
