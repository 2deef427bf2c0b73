use tracing_subscriber::EnvFilter;

/// CloudWatch Logs 向けに tracing を初期化する
///
/// RUST_LOG がなければ info。時刻は CloudWatch が付与するため出力しない
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .without_time();

    // AWS_LAMBDA_LOG_FORMAT=JSON のときは JSON で出力する
    if std::env::var("AWS_LAMBDA_LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}
