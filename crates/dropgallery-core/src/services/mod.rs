//! DropGallery 服务模块
//!
//! 包含所有业务逻辑服务

pub mod ingest;
pub mod input;
pub mod metadata;
pub mod settings;
pub mod thumbnail;

// 重新导出常用类型
pub use ingest::{IngestPipeline, IngestReport, IngestSource};
pub use input::{is_image_file, DropBatch, InputFilter};
pub use metadata::MetadataExtractor;
pub use settings::SettingsManager;
pub use thumbnail::ThumbnailService;
