//! 应用程序设置数据模型

use serde::{Deserialize, Serialize};

use crate::models::file::{AcceptedFormat, SUPPORTED_FORMATS};
use crate::utils::error::{AppError, AppResult};

/// 导入设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IngestSettings {
    /// 单个文件元数据提取的超时时间（毫秒）
    pub extraction_timeout_ms: u64,
    /// 允许的扩展名
    pub accepted_extensions: Vec<String>,
    /// 拖入目录时是否递归
    pub recursive: bool,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            extraction_timeout_ms: 10_000,
            accepted_extensions: SUPPORTED_FORMATS.iter().map(|e| e.to_string()).collect(),
            recursive: false,
        }
    }
}

/// 日志设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// 默认日志级别（RUST_LOG 优先）
    pub level: String,
    /// 是否同时写入日志文件
    pub to_file: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            to_file: true,
        }
    }
}

/// 应用程序设置
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub ingest: IngestSettings,
    pub logging: LoggingSettings,
}

impl AppSettings {
    /// 校验设置
    pub fn validate(&self) -> AppResult<()> {
        if self.ingest.extraction_timeout_ms == 0 {
            return Err(AppError::Config("extractionTimeoutMs 必须大于 0".to_string()));
        }
        if self.ingest.accepted_extensions.is_empty() {
            return Err(AppError::Config("acceptedExtensions 不能为空".to_string()));
        }
        for ext in &self.ingest.accepted_extensions {
            if AcceptedFormat::from_extension(ext).is_none() {
                return Err(AppError::Config(format!("不支持的扩展名: {}", ext)));
            }
        }
        Ok(())
    }
}
