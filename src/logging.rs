//! 日志初始化
//!
//! 输出到 stderr，按设置同时写入按天滚动的日志文件

use std::path::Path;

use dropgallery_core::models::LoggingSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// 日志文件名前缀
pub const LOG_FILE_PREFIX: &str = "dropgallery.log";

/// 根据设置和 -v 次数决定默认日志级别
pub fn default_directive(settings: &LoggingSettings, verbose: u8) -> String {
    match verbose {
        0 => settings.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// 初始化日志系统
///
/// 返回的 guard 需要一直持有，释放时会刷新文件日志。
pub fn init_logging(
    settings: &LoggingSettings,
    logs_dir: &Path,
    verbose: u8,
) -> anyhow::Result<Option<WorkerGuard>> {
    let directive = default_directive(settings, verbose);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    if settings.to_file {
        std::fs::create_dir_all(logs_dir)?;
        let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let file_layer = fmt::layer().with_ansi(false).with_writer(writer);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .with(file_layer)
            .try_init()?;
        Ok(Some(guard))
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .try_init()?;
        Ok(None)
    }
}
