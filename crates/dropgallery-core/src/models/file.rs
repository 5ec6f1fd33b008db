//! 上传文件模型

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, AppResult};

/// 支持的扩展名
pub const SUPPORTED_FORMATS: &[&str] = &["jpeg", "jpg", "png", "gif"];

/// 可接受的图片格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AcceptedFormat {
    Jpeg,
    Png,
    Gif,
}

impl AcceptedFormat {
    /// 从扩展名解析（不区分大小写，可带前导 "."）
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(AcceptedFormat::Jpeg),
            "png" => Some(AcceptedFormat::Png),
            "gif" => Some(AcceptedFormat::Gif),
            _ => None,
        }
    }

    /// 从文件名解析
    pub fn from_file_name(name: &str) -> Option<Self> {
        Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// MIME 类型
    pub fn mime_type(&self) -> &'static str {
        match self {
            AcceptedFormat::Jpeg => "image/jpeg",
            AcceptedFormat::Png => "image/png",
            AcceptedFormat::Gif => "image/gif",
        }
    }
}

/// 用户拖入的原始文件
///
/// 字节内容不可变，克隆只增加引用计数。
#[derive(Debug, Clone)]
pub struct RawFile {
    name: String,
    format: AcceptedFormat,
    bytes: Arc<[u8]>,
}

impl RawFile {
    /// 从内存数据创建
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> AppResult<Self> {
        let name = name.into();
        let format = AcceptedFormat::from_file_name(&name)
            .ok_or_else(|| AppError::UnsupportedFormat(name.clone()))?;
        Ok(Self {
            name,
            format,
            bytes: bytes.into(),
        })
    }

    /// 从磁盘读取
    pub async fn read(path: &Path) -> AppResult<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| AppError::FileNotFound(path.display().to_string()))?;
        let format = AcceptedFormat::from_file_name(&name)
            .ok_or_else(|| AppError::UnsupportedFormat(name.clone()))?;

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::FileNotFound(path.display().to_string())
            } else {
                AppError::Io(e)
            }
        })?;

        Ok(Self {
            name,
            format,
            bytes: bytes.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> AcceptedFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 共享字节（用于移入后台任务）
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        self.bytes.clone()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(AcceptedFormat::from_file_name("a.JPG"), Some(AcceptedFormat::Jpeg));
        assert_eq!(AcceptedFormat::from_file_name("b.jpeg"), Some(AcceptedFormat::Jpeg));
        assert_eq!(AcceptedFormat::from_file_name("c.png"), Some(AcceptedFormat::Png));
        assert_eq!(AcceptedFormat::from_file_name("d.gif"), Some(AcceptedFormat::Gif));
        assert_eq!(AcceptedFormat::from_file_name("e.bmp"), None);
        assert_eq!(AcceptedFormat::from_file_name("noext"), None);
    }

    #[test]
    fn test_format_from_dotted_extension() {
        assert_eq!(AcceptedFormat::from_extension(".PNG"), Some(AcceptedFormat::Png));
        assert_eq!(AcceptedFormat::from_extension("jpeg"), Some(AcceptedFormat::Jpeg));
        assert_eq!(AcceptedFormat::from_extension("."), None);
    }

    #[test]
    fn test_from_bytes_rejects_unknown_extension() {
        let err = RawFile::from_bytes("notes.txt", vec![1u8, 2, 3]).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_clone_shares_bytes() {
        let file = RawFile::from_bytes("a.png", vec![0u8; 16]).unwrap();
        let copy = file.clone();
        assert!(Arc::ptr_eq(&file.shared_bytes(), &copy.shared_bytes()));
        assert_eq!(copy.len(), 16);
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let err = RawFile::read(Path::new("/nonexistent/photo.jpg")).await.unwrap_err();
        assert!(matches!(err, AppError::FileNotFound(_)));
    }
}
