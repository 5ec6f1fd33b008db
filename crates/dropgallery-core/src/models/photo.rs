//! 照片数据模型

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::file::RawFile;
use crate::utils::error::AppError;

/// 未识别相机时的显示名称
pub const UNKNOWN_CAMERA: &str = "Unknown Camera";

/// 照片 ID（由图库单调分配）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(u64);

impl PhotoId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PhotoId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(PhotoId)
            .map_err(|_| AppError::General(format!("无效的照片 ID: {}", s)))
    }
}

/// 像素尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelDimensions {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for PixelDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {}", self.width, self.height)
    }
}

/// EXIF 原始标签值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraTags {
    /// 相机制造商
    pub make: Option<String>,
    /// 相机型号
    pub model: Option<String>,
    /// 曝光时间（秒）
    pub exposure_time: Option<f64>,
    /// 光圈值
    pub f_number: Option<f64>,
    /// ISO 感光度
    pub iso: Option<u32>,
}

/// 提取出的、可直接显示的元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedMetadata {
    /// "制造商 型号"，缺失时为 [`UNKNOWN_CAMERA`]
    pub camera_label: String,
    pub pixel_dimensions: PixelDimensions,
    /// 如 "1/200s"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exposure_time_label: Option<String>,
    /// 如 "f/2.8"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aperture_label: Option<String>,
    /// 如 "ISO 400"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso_label: Option<String>,
    pub tags: CameraTags,
}

/// 拍摄地点
///
/// 不做真实的地理解析，只有一个明确的"未解析"状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocationLabel {
    #[default]
    Unresolved,
}

impl fmt::Display for LocationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationLabel::Unresolved => f.write_str("Unknown Location"),
        }
    }
}

/// 插入图库前的照片数据（ID 和时间戳由图库分配）
#[derive(Debug, Clone)]
pub struct PhotoDraft {
    pub raw_file: RawFile,
    pub thumbnail_data_uri: Arc<str>,
    pub metadata: ExtractedMetadata,
}

/// 图库中的一张照片
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    pub id: PhotoId,
    #[serde(skip)]
    pub raw_file: RawFile,
    pub thumbnail_data_uri: Arc<str>,
    pub display_name: String,
    pub upload_timestamp: DateTime<Utc>,
    pub metadata: ExtractedMetadata,
    pub location: LocationLabel,
}

impl PhotoRecord {
    /// 由草稿生成记录
    pub(crate) fn from_draft(id: PhotoId, draft: PhotoDraft, uploaded_at: DateTime<Utc>) -> Self {
        let display_name = draft.raw_file.name().to_string();
        Self {
            id,
            raw_file: draft.raw_file,
            thumbnail_data_uri: draft.thumbnail_data_uri,
            display_name,
            upload_timestamp: uploaded_at,
            metadata: draft.metadata,
            location: LocationLabel::Unresolved,
        }
    }
}

/// 失败类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    /// 读取文件失败
    Read,
    /// 图片无法解码
    Decode,
    /// 处理超时
    Timeout,
    /// 内部错误
    Internal,
}

impl From<&AppError> for FailureKind {
    fn from(err: &AppError) -> Self {
        match err {
            AppError::Io(_) | AppError::FileNotFound(_) => FailureKind::Read,
            AppError::Image(_) | AppError::UnsupportedFormat(_) => FailureKind::Decode,
            AppError::Timeout { .. } => FailureKind::Timeout,
            _ => FailureKind::Internal,
        }
    }
}

/// 插入失败列表前的数据
#[derive(Debug, Clone)]
pub struct FailureDraft {
    pub file_name: String,
    pub kind: FailureKind,
    pub message: String,
}

impl FailureDraft {
    pub fn from_error(file_name: impl Into<String>, err: &AppError) -> Self {
        Self {
            file_name: file_name.into(),
            kind: FailureKind::from(err),
            message: err.to_string(),
        }
    }
}

/// 处理失败的文件
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestFailure {
    pub id: PhotoId,
    pub file_name: String,
    pub kind: FailureKind,
    pub message: String,
    pub failed_at: DateTime<Utc>,
}
