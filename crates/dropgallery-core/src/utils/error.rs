//! DropGallery 错误处理模块
//!
//! 定义应用程序错误类型

use serde::Serialize;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 图像处理错误
    #[error("图像处理错误: {0}")]
    Image(#[from] image::ImageError),

    /// 文件未找到
    #[error("文件未找到: {0}")]
    FileNotFound(String),

    /// 不支持的格式
    #[error("不支持的格式: {0}")]
    UnsupportedFormat(String),

    /// 处理超时
    #[error("处理超时: {name} ({timeout_ms}ms)")]
    Timeout { name: String, timeout_ms: u64 },

    /// 后台任务失败
    #[error("后台任务失败: {0}")]
    TaskFailed(String),

    /// 记录不存在
    #[error("记录不存在: {0}")]
    NotFound(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 通用错误
    #[error("{0}")]
    General(String),
}

impl AppError {
    /// 稳定的错误码，供前端区分错误类型
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Io(_) => "E_IO_ERROR",
            AppError::Image(_) => "E_IMAGE_ERROR",
            AppError::FileNotFound(_) => "E_FILE_NOT_FOUND",
            AppError::UnsupportedFormat(_) => "E_UNSUPPORTED_FORMAT",
            AppError::Timeout { .. } => "E_TIMEOUT",
            AppError::TaskFailed(_) => "E_TASK_FAILED",
            AppError::NotFound(_) => "E_NOT_FOUND",
            AppError::Config(_) => "E_CONFIG",
            AppError::General(_) => "E_GENERAL",
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::TaskFailed(err.to_string())
    }
}

/// 用于前端命令返回的错误包装
#[derive(Debug, Clone, Serialize)]
pub struct CommandError {
    pub code: String,
    pub message: String,
}

impl From<AppError> for CommandError {
    fn from(err: AppError) -> Self {
        CommandError {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for CommandError {}

/// 应用程序结果类型别名
pub type AppResult<T> = Result<T, AppError>;
