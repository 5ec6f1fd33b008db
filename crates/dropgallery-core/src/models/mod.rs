//! DropGallery 数据模型

pub mod file;
pub mod photo;
pub mod settings;

pub use file::{AcceptedFormat, RawFile, SUPPORTED_FORMATS};
pub use photo::{
    CameraTags, ExtractedMetadata, FailureDraft, FailureKind, IngestFailure, LocationLabel,
    PhotoDraft, PhotoId, PhotoRecord, PixelDimensions, UNKNOWN_CAMERA,
};
pub use settings::{AppSettings, IngestSettings, LoggingSettings};
