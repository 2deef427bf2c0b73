use thumbnail_core::ThumbnailTransformer;
use thumbnail_handler::{HandlerConfig, Variant, serve, telemetry};

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    telemetry::init_tracing();

    let config = HandlerConfig::from_env(Variant::Resize)?;
    serve(config, ThumbnailTransformer).await
}
