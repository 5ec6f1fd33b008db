//! 设置文件读写
//!
//! 文件缺失时使用默认设置；写入前先校验

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::models::AppSettings;
use crate::paths::PathProvider;
use crate::utils::error::{AppError, AppResult};

/// 设置管理器
#[derive(Debug, Clone)]
pub struct SettingsManager {
    path: PathBuf,
}

impl SettingsManager {
    pub fn new(provider: &dyn PathProvider) -> Self {
        Self::from_path(provider.settings_path())
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取并校验设置
    pub fn load(&self) -> AppResult<AppSettings> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("未找到设置文件 {}，使用默认设置", self.path.display());
                return Ok(AppSettings::default());
            }
            Err(e) => return Err(config_error("读取", &self.path, e)),
        };

        let settings: AppSettings =
            serde_json::from_str(&content).map_err(|e| config_error("解析", &self.path, e))?;
        settings.validate()?;
        Ok(settings)
    }

    /// 校验后写入，按需创建目录
    pub fn save(&self, settings: &AppSettings) -> AppResult<()> {
        settings.validate()?;

        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| config_error("创建目录", dir, e))?;
        }
        let content = serde_json::to_string_pretty(settings)
            .map_err(|e| config_error("序列化", &self.path, e))?;
        std::fs::write(&self.path, content).map_err(|e| config_error("写入", &self.path, e))?;

        tracing::debug!("设置已写入 {}", self.path.display());
        Ok(())
    }
}

fn config_error(action: &str, path: &Path, err: impl std::fmt::Display) -> AppError {
    AppError::Config(format!("{}设置失败 ({}): {}", action, path.display(), err))
}
