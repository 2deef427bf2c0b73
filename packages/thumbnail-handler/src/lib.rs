pub mod config;
pub mod event;
pub mod handler;
pub mod storage;
pub mod telemetry;

use lambda_runtime::{LambdaEvent, service_fn};
use thumbnail_core::ImageTransformer;

pub use config::{ConfigError, HandlerConfig, Variant};
pub use event::{EventError, S3NotificationEvent, UploadNotification};
pub use handler::{HandlerError, HandlerResponse, Outcome, ThumbnailHandler};
pub use storage::S3ObjectStore;

/// Lambda ランタイムでハンドラを動かす
pub async fn serve<T: ImageTransformer>(
    config: HandlerConfig,
    transformer: T,
) -> Result<(), lambda_runtime::Error> {
    tracing::info!(
        destination = %config.destination_bucket,
        variant = ?config.variant,
        "starting thumbnail handler"
    );

    let store = S3ObjectStore::from_env().await;
    let handler = ThumbnailHandler::new(config, store, transformer);
    let handler = &handler;

    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<S3NotificationEvent>| async move {
            handler.handle_event(event).await
        },
    ))
    .await
}
