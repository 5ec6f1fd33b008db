//! DropGallery - 拖入即导入的照片图库
//!
//! 命令行前端：把拖入的文件交给 dropgallery-core，再把图库渲染为文本卡片或 JSON

pub mod cli;
pub mod commands;
pub mod logging;
pub mod render;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dropgallery_core::{
    AppResult, AppSettings, DefaultPathProvider, GalleryCore, LoggingEventSink, PathProvider,
    SettingsManager, SharedEventSink,
};

use cli::Cli;

/// 应用程序状态
pub struct AppState {
    pub core: Arc<GalleryCore>,
}

impl AppState {
    pub fn new(settings: &AppSettings, event_sink: SharedEventSink) -> AppResult<Self> {
        Ok(Self {
            core: Arc::new(GalleryCore::new(settings, event_sink)?),
        })
    }
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let provider = match &cli.data_dir {
        Some(dir) => DefaultPathProvider::with_base_dir(dir.clone()),
        None => DefaultPathProvider::new(),
    };

    let settings_manager = SettingsManager::new(&provider);
    let mut settings = settings_manager
        .load()
        .with_context(|| format!("无法加载设置: {}", settings_manager.path().display()))?;
    cli.apply_overrides(&mut settings);

    // 初始化日志系统
    let _log_guard = logging::init_logging(&settings.logging, &provider.logs_dir(), cli.verbose)?;

    tracing::info!("DropGallery 启动中...");

    let state = AppState::new(&settings, Arc::new(LoggingEventSink))?;

    // 单线程事件循环，解码等耗时工作交给阻塞线程池
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("无法创建异步运行时")?;

    let output = runtime.block_on(execute(&state, &cli))?;
    print!("{}", output);
    Ok(())
}

/// 执行一次拖入，并按命令行选项删除照片，返回渲染结果
pub async fn execute(state: &AppState, cli: &Cli) -> anyhow::Result<String> {
    commands::drop_files(state, cli.paths.clone()).await?;

    for id in &cli.remove {
        if !commands::delete_photo(state, *id) {
            tracing::warn!("照片不存在，忽略删除: {}", id);
        }
    }

    let photos = commands::list_photos(state);
    let failures = commands::list_failures(state);

    let output = if cli.json {
        render::render_json(&photos, &failures)?
    } else {
        render::render_text(&photos, &failures)
    };
    Ok(output)
}
