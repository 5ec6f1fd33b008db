//! DropGallery Core Library
//!
//! This crate provides the core logic of DropGallery, a drop-to-import photo
//! gallery. It is frontend-agnostic: a front end hands it dropped paths or
//! in-memory files and renders the ordered snapshot it keeps.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Data structures (PhotoRecord, ExtractedMetadata, RawFile, AppSettings)
//! - `store`: In-memory ordered gallery plus the failed-file list
//! - `services`: Metadata extraction, thumbnails, input filtering, the ingest pipeline
//! - `events`: Event emission abstraction (EventSink trait)
//! - `paths`: Path provider abstraction (PathProvider trait)
//! - `jobs`: Tracking of files whose ingest is still running
//! - `utils`: Error handling and the join-with-deadline helper
//!
//! # Example
//!
//! ```no_run
//! use dropgallery_core::{AppSettings, GalleryCore, NoOpEventSink};
//! use std::sync::Arc;
//!
//! # async fn demo() -> dropgallery_core::AppResult<()> {
//! let core = GalleryCore::new(&AppSettings::default(), Arc::new(NoOpEventSink))?;
//! let report = core.drop_paths(vec!["holiday.jpg".into()]).await;
//! println!("{} added, {} failed", report.added.len(), report.failed.len());
//!
//! for photo in core.snapshot() {
//!     println!("{} - {}", photo.display_name, photo.metadata.camera_label);
//! }
//! # Ok(())
//! # }
//! ```

pub mod events;
pub mod jobs;
pub mod models;
pub mod paths;
pub mod services;
pub mod store;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use events::{EventSink, EventSinkExt, LoggingEventSink, NoOpEventSink, SharedEventSink};
pub use jobs::{IngestJobs, JobId};
pub use models::{
    AcceptedFormat, AppSettings, ExtractedMetadata, FailureKind, IngestFailure, LocationLabel,
    PhotoId, PhotoRecord, PixelDimensions, RawFile,
};
pub use paths::{DefaultPathProvider, PathProvider, SharedPathProvider};
pub use services::{
    IngestPipeline, IngestReport, IngestSource, InputFilter, MetadataExtractor, SettingsManager,
    ThumbnailService,
};
pub use store::GalleryStore;
pub use utils::{AppError, AppResult, CommandError};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use events::{PhotoEventPayload, BATCH_FINISHED, PHOTO_REMOVED};

/// DropGallery core context.
///
/// Owns the gallery state and everything needed to fill it. A front end
/// creates one of these and keeps it for the lifetime of its session.
pub struct GalleryCore {
    store: RwLock<GalleryStore>,
    pipeline: IngestPipeline,
    input: InputFilter,
    jobs: Arc<IngestJobs>,
    event_sink: SharedEventSink,
}

impl GalleryCore {
    /// Create a new GalleryCore instance.
    ///
    /// # Arguments
    ///
    /// * `settings` - Validated application settings
    /// * `event_sink` - The event sink for emitting gallery events
    pub fn new(settings: &AppSettings, event_sink: SharedEventSink) -> AppResult<Self> {
        settings.validate()?;

        let jobs = Arc::new(IngestJobs::new());
        let extractor = MetadataExtractor::new(Duration::from_millis(
            settings.ingest.extraction_timeout_ms,
        ));
        let pipeline = IngestPipeline::new(
            extractor,
            ThumbnailService::new(),
            jobs.clone(),
            event_sink.clone(),
        );

        Ok(Self {
            store: RwLock::new(GalleryStore::new()),
            pipeline,
            input: InputFilter::new(&settings.ingest),
            jobs,
            event_sink,
        })
    }

    /// Import dropped paths. Directories are expanded, unsupported files are
    /// skipped, and every accepted file ends up as a photo or a failure.
    pub async fn drop_paths(&self, paths: Vec<PathBuf>) -> IngestReport {
        let batch = self.input.partition(paths);
        let sources = batch.accepted.into_iter().map(IngestSource::Path).collect();
        let rejected = batch
            .rejected
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        self.run_batch(sources, rejected).await
    }

    /// Import files that are already in memory.
    pub async fn drop_files(&self, files: Vec<RawFile>) -> IngestReport {
        let (accepted, rejected) = self.input.partition_files(files);
        let sources = accepted.into_iter().map(IngestSource::Memory).collect();
        self.run_batch(sources, rejected).await
    }

    async fn run_batch(&self, sources: Vec<IngestSource>, rejected: Vec<String>) -> IngestReport {
        let mut report = self.pipeline.ingest_batch(&self.store, sources).await;
        report.rejected = rejected;

        tracing::info!(
            "导入完成: 新增 {}, 失败 {}, 跳过 {}",
            report.added.len(),
            report.failed.len(),
            report.rejected.len()
        );
        self.event_sink.emit_typed(BATCH_FINISHED, &report);
        report
    }

    /// Remove a photo. Unknown IDs are ignored.
    pub fn remove_photo(&self, id: PhotoId) -> Option<PhotoRecord> {
        let removed = self.store.write().remove(id)?;
        tracing::info!("已删除照片: {} (id={})", removed.display_name, id);
        self.event_sink.emit_typed(
            PHOTO_REMOVED,
            &PhotoEventPayload {
                id,
                file_name: removed.display_name.clone(),
            },
        );
        Some(removed)
    }

    /// Get a copy of one photo.
    pub fn photo(&self, id: PhotoId) -> Option<PhotoRecord> {
        self.store.read().get(id).cloned()
    }

    /// Ordered copy of the gallery at call time.
    pub fn snapshot(&self) -> Vec<PhotoRecord> {
        self.store.read().snapshot().to_vec()
    }

    /// Borrow the gallery without copying it.
    pub fn with_snapshot<R>(&self, f: impl FnOnce(&[PhotoRecord]) -> R) -> R {
        f(self.store.read().snapshot())
    }

    /// Number of photos in the gallery.
    pub fn photo_count(&self) -> usize {
        self.store.read().len()
    }

    /// Files that could not be imported.
    pub fn failures(&self) -> Vec<IngestFailure> {
        self.store.read().failures().to_vec()
    }

    /// Dismiss a failure entry. Returns false for unknown IDs.
    pub fn dismiss_failure(&self, id: PhotoId) -> bool {
        self.store.write().dismiss_failure(id)
    }

    /// Files whose ingest is still running.
    ///
    /// Only meaningful to callers polling from another task while a drop is
    /// being awaited; once `drop_paths`/`drop_files` returns it is empty.
    pub fn pending_files(&self) -> Vec<String> {
        self.jobs.pending_files()
    }

    /// Get the event sink reference.
    pub fn events(&self) -> &SharedEventSink {
        &self.event_sink
    }
}
