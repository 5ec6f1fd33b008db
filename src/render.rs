//! 图库渲染
//!
//! 文本卡片供终端阅读，JSON 供其他程序消费

use std::fmt::Write;

use chrono::Local;
use dropgallery_core::{IngestFailure, PhotoRecord};
use serde::Serialize;

/// 上传日期格式，例如 "October 19, 2026"
const DATE_FORMAT: &str = "%B %-d, %Y";

#[derive(Serialize)]
struct GalleryView<'a> {
    photos: &'a [PhotoRecord],
    failures: &'a [IngestFailure],
}

/// 渲染单张照片卡片
pub fn render_card(photo: &PhotoRecord) -> String {
    let mut out = String::new();
    let meta = &photo.metadata;

    let _ = writeln!(out, "#{} {}", photo.id, photo.display_name);
    let _ = writeln!(out, "  {}", meta.camera_label);
    let _ = writeln!(
        out,
        "  {}",
        photo
            .upload_timestamp
            .with_timezone(&Local)
            .format(DATE_FORMAT)
    );
    let _ = writeln!(out, "  {}", meta.pixel_dimensions);

    let exposure: Vec<&str> = [
        meta.exposure_time_label.as_deref(),
        meta.aperture_label.as_deref(),
        meta.iso_label.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !exposure.is_empty() {
        let _ = writeln!(out, "  {}", exposure.join("  "));
    }

    let _ = writeln!(out, "  {}", photo.location);
    out
}

/// 渲染整个图库
pub fn render_text(photos: &[PhotoRecord], failures: &[IngestFailure]) -> String {
    let mut out = String::new();

    if photos.is_empty() {
        out.push_str("Gallery is empty\n");
    }
    for (i, photo) in photos.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&render_card(photo));
    }

    if !failures.is_empty() {
        let _ = writeln!(out, "\nFailed ({}):", failures.len());
        for failure in failures {
            let _ = writeln!(out, "  {}: {}", failure.file_name, failure.message);
        }
    }
    out
}

/// 以 JSON 输出图库
pub fn render_json(
    photos: &[PhotoRecord],
    failures: &[IngestFailure],
) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(&GalleryView { photos, failures })?;
    json.push('\n');
    Ok(json)
}
