//! 缩略图服务
//!
//! 将上传文件编码为可直接显示的 data URI。不做缩放，原始字节原样内嵌

use std::sync::Arc;

use base64::Engine;

use crate::models::file::RawFile;
use crate::utils::error::AppResult;

/// 缩略图服务
#[derive(Debug, Clone, Default)]
pub struct ThumbnailService;

impl ThumbnailService {
    pub fn new() -> Self {
        Self
    }

    /// 后台生成 data URI
    pub async fn generate(&self, file: &RawFile) -> AppResult<Arc<str>> {
        let mime = Self::mime_type(file);
        let bytes = file.shared_bytes();

        let uri = tokio::task::spawn_blocking(move || Self::encode(mime, &bytes)).await?;
        tracing::debug!("生成缩略图: {} ({} bytes)", file.name(), uri.len());
        Ok(uri.into())
    }

    /// MIME 类型：优先按文件内容识别，其次按扩展名
    pub fn mime_type(file: &RawFile) -> &'static str {
        image::guess_format(file.bytes())
            .map(|format| format.to_mime_type())
            .unwrap_or_else(|_| file.format().mime_type())
    }

    /// 编码为 `data:<mime>;base64,<payload>`
    pub fn encode(mime: &str, bytes: &[u8]) -> String {
        let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
        format!("data:{};base64,{}", mime, payload)
    }
}
