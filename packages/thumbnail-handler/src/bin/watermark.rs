use thumbnail_core::WatermarkTransformer;
use thumbnail_handler::{ConfigError, HandlerConfig, Variant, serve, telemetry};

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    telemetry::init_tracing();

    let config = HandlerConfig::from_env(Variant::Watermark)?;
    let font_path = config
        .font_path
        .clone()
        .ok_or(ConfigError::Missing("WATERMARK_FONT_PATH"))?;

    // フォントは起動時に一度だけ読み込み、呼び出し間で共有する
    let transformer = WatermarkTransformer::from_file(&font_path)?;
    serve(config, transformer).await
}
