//! 元数据提取服务
//!
//! 负责从上传的图片中提取 EXIF 元数据和像素尺寸，并格式化为可显示的文本

use std::io::Cursor;
use std::time::Duration;

use exif::{In, Reader, Tag, Value};

use crate::models::file::RawFile;
use crate::models::photo::{CameraTags, ExtractedMetadata, PixelDimensions, UNKNOWN_CAMERA};
use crate::utils::error::AppResult;
use crate::utils::join::join_within;

/// 元数据提取器
#[derive(Debug, Clone)]
pub struct MetadataExtractor {
    timeout: Duration,
}

impl MetadataExtractor {
    /// 默认超时时间
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 提取元数据
    ///
    /// EXIF 解析和像素解码并发执行，两者都完成后才返回。
    /// EXIF 缺失或损坏不会报错，只是对应字段为空；图片无法解码或超时会返回错误。
    pub async fn extract(&self, file: &RawFile) -> AppResult<ExtractedMetadata> {
        let tag_bytes = file.shared_bytes();
        let pixel_bytes = file.shared_bytes();

        let (tags, dimensions) = join_within(
            file.name(),
            self.timeout,
            tokio::task::spawn_blocking(move || Self::read_tags(&tag_bytes)),
            tokio::task::spawn_blocking(move || Self::decode_dimensions(&pixel_bytes)),
        )
        .await?;

        let tags = tags.unwrap_or_else(|e| {
            tracing::warn!("EXIF 解析任务失败: {} -> {}", file.name(), e);
            CameraTags::default()
        });
        let dimensions = dimensions??;

        Ok(Self::compose(tags, dimensions))
    }

    /// 解析 EXIF 标签
    pub fn read_tags(bytes: &[u8]) -> CameraTags {
        let exif = match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
            Ok(exif) => exif,
            Err(e) => {
                tracing::debug!("未找到可用的 EXIF 数据: {}", e);
                return CameraTags::default();
            }
        };

        let mut tags = CameraTags::default();

        // 相机信息
        if let Some(field) = exif.get_field(Tag::Make, In::PRIMARY) {
            tags.make = Self::get_ascii_value(&field.value);
        }
        if let Some(field) = exif.get_field(Tag::Model, In::PRIMARY) {
            tags.model = Self::get_ascii_value(&field.value);
        }

        // 曝光时间
        if let Some(field) = exif.get_field(Tag::ExposureTime, In::PRIMARY) {
            tags.exposure_time = Self::get_rational_value(&field.value);
        }

        // 光圈
        if let Some(field) = exif.get_field(Tag::FNumber, In::PRIMARY) {
            tags.f_number = Self::get_rational_value(&field.value);
        }

        // ISO
        if let Some(field) = exif.get_field(Tag::PhotographicSensitivity, In::PRIMARY) {
            tags.iso = Self::get_u32_value(&field.value);
        }

        tags
    }

    /// 解码图片获取像素尺寸
    pub fn decode_dimensions(bytes: &[u8]) -> AppResult<PixelDimensions> {
        let img = image::load_from_memory(bytes)?;
        Ok(PixelDimensions {
            width: img.width(),
            height: img.height(),
        })
    }

    /// 合并标签和尺寸为显示用元数据
    pub fn compose(tags: CameraTags, pixel_dimensions: PixelDimensions) -> ExtractedMetadata {
        ExtractedMetadata {
            camera_label: Self::camera_label(tags.make.as_deref(), tags.model.as_deref()),
            pixel_dimensions,
            exposure_time_label: tags.exposure_time.and_then(Self::format_exposure),
            aperture_label: tags.f_number.and_then(Self::format_aperture),
            iso_label: tags.iso.map(Self::format_iso),
            tags,
        }
    }

    /// "制造商 型号"，两者都为空时返回 "Unknown Camera"
    pub fn camera_label(make: Option<&str>, model: Option<&str>) -> String {
        let label = format!("{} {}", make.unwrap_or(""), model.unwrap_or(""));
        let label = label.trim();
        if label.is_empty() {
            UNKNOWN_CAMERA.to_string()
        } else {
            label.to_string()
        }
    }

    /// 曝光时间格式化为 "1/Ns"
    pub fn format_exposure(seconds: f64) -> Option<String> {
        if !seconds.is_finite() || seconds <= 0.0 {
            return None;
        }
        // 1 秒及以上的长曝光，倒数取整会变成 0
        if seconds >= 1.0 {
            return Some(format!("{}s", seconds));
        }
        let denominator = (1.0 / seconds).round() as u64;
        Some(format!("1/{}s", denominator))
    }

    /// 光圈格式化为 "f/N"，不做舍入
    pub fn format_aperture(f_number: f64) -> Option<String> {
        if !f_number.is_finite() || f_number <= 0.0 {
            return None;
        }
        Some(format!("f/{}", f_number))
    }

    pub fn format_iso(iso: u32) -> String {
        format!("ISO {}", iso)
    }

    /// 获取 ASCII 值（去掉首尾空白和 NUL）
    fn get_ascii_value(value: &Value) -> Option<String> {
        match value {
            Value::Ascii(parts) => {
                let text = parts
                    .iter()
                    .map(|p| String::from_utf8_lossy(p).into_owned())
                    .collect::<Vec<_>>()
                    .join(" ");
                let text = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
                if text.is_empty() {
                    None
                } else {
                    Some(text.to_string())
                }
            }
            _ => None,
        }
    }

    /// 获取 u32 值
    fn get_u32_value(value: &Value) -> Option<u32> {
        match value {
            Value::Short(v) if !v.is_empty() => Some(v[0] as u32),
            Value::Long(v) if !v.is_empty() => Some(v[0]),
            _ => None,
        }
    }

    /// 获取有理数值 (如曝光时间、光圈)
    fn get_rational_value(value: &Value) -> Option<f64> {
        match value {
            Value::Rational(v) if !v.is_empty() => {
                let r = &v[0];
                if r.denom != 0 {
                    Some(r.num as f64 / r.denom as f64)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{gif, jpeg_with_exif, png, ExifFixture};
    use crate::utils::error::AppError;

    #[test]
    fn test_format_exposure() {
        assert_eq!(MetadataExtractor::format_exposure(0.01).as_deref(), Some("1/100s"));
        assert_eq!(MetadataExtractor::format_exposure(1.0 / 200.0).as_deref(), Some("1/200s"));
        assert_eq!(MetadataExtractor::format_exposure(1.0 / 3.0).as_deref(), Some("1/3s"));
        assert_eq!(MetadataExtractor::format_exposure(2.0).as_deref(), Some("2s"));
        assert_eq!(MetadataExtractor::format_exposure(0.0), None);
        assert_eq!(MetadataExtractor::format_exposure(f64::NAN), None);
    }

    #[test]
    fn test_format_aperture() {
        assert_eq!(MetadataExtractor::format_aperture(2.8).as_deref(), Some("f/2.8"));
        assert_eq!(MetadataExtractor::format_aperture(4.0).as_deref(), Some("f/4"));
        assert_eq!(MetadataExtractor::format_aperture(28.0 / 10.0).as_deref(), Some("f/2.8"));
        assert_eq!(MetadataExtractor::format_aperture(-1.0), None);
    }

    #[test]
    fn test_format_iso() {
        assert_eq!(MetadataExtractor::format_iso(400), "ISO 400");
    }

    #[test]
    fn test_camera_label() {
        assert_eq!(MetadataExtractor::camera_label(Some("Canon"), Some("EOS")), "Canon EOS");
        assert_eq!(MetadataExtractor::camera_label(None, Some("EOS")), "EOS");
        assert_eq!(MetadataExtractor::camera_label(Some("Canon "), None), "Canon");
        assert_eq!(MetadataExtractor::camera_label(None, None), UNKNOWN_CAMERA);
        assert_eq!(MetadataExtractor::camera_label(Some("  "), Some("")), UNKNOWN_CAMERA);
    }

    #[test]
    fn test_rational_with_zero_denominator_is_ignored() {
        let value = Value::Rational(vec![exif::Rational { num: 1, denom: 0 }]);
        assert_eq!(MetadataExtractor::get_rational_value(&value), None);

        let value = Value::Rational(vec![exif::Rational { num: 1, denom: 200 }]);
        assert_eq!(MetadataExtractor::get_rational_value(&value), Some(0.005));
    }

    #[test]
    fn test_read_tags_from_jpeg() {
        let bytes = jpeg_with_exif(64, 48, &ExifFixture::canon_eos());
        let tags = MetadataExtractor::read_tags(&bytes);

        assert_eq!(tags.make.as_deref(), Some("Canon"));
        assert_eq!(tags.model.as_deref(), Some("EOS"));
        assert_eq!(tags.exposure_time, Some(0.005));
        assert_eq!(tags.f_number, Some(4.0));
        assert_eq!(tags.iso, Some(400));
    }

    #[test]
    fn test_read_tags_without_exif() {
        assert_eq!(MetadataExtractor::read_tags(&png(10, 10)), CameraTags::default());
        assert_eq!(MetadataExtractor::read_tags(&gif(10, 10)), CameraTags::default());
        assert_eq!(MetadataExtractor::read_tags(b"not an image"), CameraTags::default());
    }

    #[test]
    fn test_decode_dimensions() {
        let dims = MetadataExtractor::decode_dimensions(&png(400, 300)).unwrap();
        assert_eq!(dims, PixelDimensions { width: 400, height: 300 });

        let err = MetadataExtractor::decode_dimensions(b"\x89PNG garbage").unwrap_err();
        assert!(matches!(err, AppError::Image(_)));
    }

    #[test]
    fn test_compose_leaves_missing_labels_unset() {
        let tags = CameraTags {
            make: Some("Canon".into()),
            ..Default::default()
        };
        let metadata = MetadataExtractor::compose(tags, PixelDimensions { width: 1, height: 2 });

        assert_eq!(metadata.camera_label, "Canon");
        assert_eq!(metadata.exposure_time_label, None);
        assert_eq!(metadata.aperture_label, None);
        assert_eq!(metadata.iso_label, None);
    }

    #[tokio::test]
    async fn test_extract_jpeg_with_exif() {
        let bytes = jpeg_with_exif(800, 600, &ExifFixture::canon_eos());
        let file = RawFile::from_bytes("a.jpg", bytes).unwrap();

        let metadata = MetadataExtractor::default().extract(&file).await.unwrap();

        assert_eq!(metadata.camera_label, "Canon EOS");
        assert_eq!(metadata.exposure_time_label.as_deref(), Some("1/200s"));
        assert_eq!(metadata.aperture_label.as_deref(), Some("f/4"));
        assert_eq!(metadata.iso_label.as_deref(), Some("ISO 400"));
        assert_eq!(metadata.pixel_dimensions.to_string(), "800 × 600");
    }

    #[tokio::test]
    async fn test_extract_dimensions_without_tags() {
        let file = RawFile::from_bytes("b.png", png(400, 300)).unwrap();

        let metadata = MetadataExtractor::default().extract(&file).await.unwrap();

        assert_eq!(metadata.camera_label, UNKNOWN_CAMERA);
        assert_eq!(metadata.pixel_dimensions.to_string(), "400 × 300");
        assert_eq!(metadata.exposure_time_label, None);
    }

    #[tokio::test]
    async fn test_extract_corrupt_image_fails() {
        let file = RawFile::from_bytes("broken.jpg", b"definitely not a jpeg".to_vec()).unwrap();

        let result = MetadataExtractor::default().extract(&file).await;
        assert!(matches!(result, Err(AppError::Image(_))));
    }
}
