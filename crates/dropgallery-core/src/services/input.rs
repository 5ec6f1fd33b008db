//! 输入过滤
//!
//! 拖入的路径按扩展名白名单过滤，目录展开为其中的文件。被拒绝的文件不会进入提取流程。

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::models::file::{AcceptedFormat, RawFile, SUPPORTED_FORMATS};
use crate::models::settings::IngestSettings;

/// 检查文件扩展名是否在支持列表中
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_FORMATS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// 一次拖入的过滤结果
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropBatch {
    /// 通过过滤的文件
    pub accepted: Vec<PathBuf>,
    /// 被拒绝的文件
    pub rejected: Vec<PathBuf>,
}

/// 输入过滤器
#[derive(Debug, Clone)]
pub struct InputFilter {
    accepted: Vec<AcceptedFormat>,
    recursive: bool,
}

impl InputFilter {
    pub fn new(settings: &IngestSettings) -> Self {
        Self {
            accepted: settings
                .accepted_extensions
                .iter()
                .filter_map(|e| AcceptedFormat::from_extension(e))
                .collect(),
            recursive: settings.recursive,
        }
    }

    /// 按文件名判断是否接受
    pub fn accepts_name(&self, name: &str) -> bool {
        self.accepts_path(Path::new(name))
    }

    fn accepts_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(AcceptedFormat::from_extension)
            .map(|format| self.accepted.contains(&format))
            .unwrap_or(false)
    }

    /// 过滤拖入的路径，目录会被展开
    ///
    /// 不存在的路径按文件处理，读取时再报告错误。
    pub fn partition(&self, paths: Vec<PathBuf>) -> DropBatch {
        let mut batch = DropBatch::default();

        for path in paths {
            if path.is_dir() {
                for file in self.expand_dir(&path) {
                    self.sort_into(&mut batch, file);
                }
            } else {
                self.sort_into(&mut batch, path);
            }
        }

        if !batch.rejected.is_empty() {
            tracing::debug!("跳过 {} 个不支持的文件", batch.rejected.len());
        }
        batch
    }

    /// 过滤内存中的文件
    pub fn partition_files(&self, files: Vec<RawFile>) -> (Vec<RawFile>, Vec<String>) {
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();
        for file in files {
            if self.accepts_name(file.name()) {
                accepted.push(file);
            } else {
                tracing::debug!("跳过不支持的文件: {}", file.name());
                rejected.push(file.name().to_string());
            }
        }
        (accepted, rejected)
    }

    fn sort_into(&self, batch: &mut DropBatch, path: PathBuf) {
        if self.accepts_path(&path) {
            batch.accepted.push(path);
        } else {
            batch.rejected.push(path);
        }
    }

    fn expand_dir(&self, dir: &Path) -> Vec<PathBuf> {
        let mut walker = WalkDir::new(dir)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name();
        if !self.recursive {
            walker = walker.max_depth(1);
        }

        walker
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("无法访问: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .collect()
    }
}

impl Default for InputFilter {
    fn default() -> Self {
        Self::new(&IngestSettings::default())
    }
}
