//! 导入流程
//!
//! 每个文件独立处理：读取 → 并发执行元数据提取和缩略图生成 → 两者都完成后写入图库。
//! 文件之间的完成顺序不确定；每个文件最终只会产生一张照片或一条失败记录。

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tokio::task::JoinSet;

use crate::events::{
    EventSinkExt, FailureEventPayload, PhotoEventPayload, SharedEventSink, INGEST_FAILED,
    PHOTO_ADDED,
};
use crate::jobs::{IngestJobs, JobId};
use crate::models::file::RawFile;
use crate::models::photo::{FailureDraft, PhotoDraft, PhotoId};
use crate::services::metadata::MetadataExtractor;
use crate::services::thumbnail::ThumbnailService;
use crate::store::GalleryStore;
use crate::utils::error::{AppError, AppResult};

/// 导入来源
#[derive(Debug, Clone)]
pub enum IngestSource {
    /// 磁盘上的文件，在流程内读取
    Path(PathBuf),
    /// 已在内存中的文件
    Memory(RawFile),
}

impl IngestSource {
    /// 显示用文件名
    pub fn display_name(&self) -> String {
        match self {
            IngestSource::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            IngestSource::Memory(file) => file.name().to_string(),
        }
    }
}

/// 一批导入的结果
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    /// 通过过滤进入流程的文件数
    pub accepted: usize,
    /// 被输入过滤拒绝的文件
    pub rejected: Vec<String>,
    /// 新增照片（按完成顺序）
    pub added: Vec<PhotoId>,
    /// 新增失败记录（按完成顺序）
    pub failed: Vec<PhotoId>,
}

/// 任务结束（包括 panic）时自动移出待处理列表
struct JobGuard {
    jobs: Arc<IngestJobs>,
    job_id: JobId,
}

impl Drop for JobGuard {
    fn drop(&mut self) {
        self.jobs.complete_job(self.job_id);
    }
}

/// 导入流程
#[derive(Clone)]
pub struct IngestPipeline {
    extractor: MetadataExtractor,
    thumbnails: ThumbnailService,
    jobs: Arc<IngestJobs>,
    event_sink: SharedEventSink,
}

impl IngestPipeline {
    pub fn new(
        extractor: MetadataExtractor,
        thumbnails: ThumbnailService,
        jobs: Arc<IngestJobs>,
        event_sink: SharedEventSink,
    ) -> Self {
        Self {
            extractor,
            thumbnails,
            jobs,
            event_sink,
        }
    }

    /// 处理单个文件：元数据和缩略图并发生成，都成功后组成草稿
    pub async fn process(&self, file: &RawFile) -> AppResult<PhotoDraft> {
        let (metadata, thumbnail) =
            tokio::join!(self.extractor.extract(file), self.thumbnails.generate(file));

        Ok(PhotoDraft {
            raw_file: file.clone(),
            thumbnail_data_uri: thumbnail?,
            metadata: metadata?,
        })
    }

    async fn load_and_process(&self, source: IngestSource) -> AppResult<PhotoDraft> {
        let file = match source {
            IngestSource::Path(path) => RawFile::read(&path).await?,
            IngestSource::Memory(file) => file,
        };
        self.process(&file).await
    }

    /// 并发处理一批文件，逐个写入图库
    ///
    /// 图库只在当前任务中修改，每次写入持锁时间很短且不跨 await。
    pub async fn ingest_batch(
        &self,
        store: &RwLock<GalleryStore>,
        sources: Vec<IngestSource>,
    ) -> IngestReport {
        let mut report = IngestReport {
            accepted: sources.len(),
            ..Default::default()
        };
        let mut tasks = JoinSet::new();

        for source in sources {
            let name = source.display_name();
            let guard = JobGuard {
                jobs: self.jobs.clone(),
                job_id: self.jobs.start_job(&name),
            };
            let pipeline = self.clone();
            tasks.spawn(async move {
                let result = pipeline.load_and_process(source).await;
                (guard, name, result)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((guard, name, Ok(draft))) => {
                    let id = store.write().insert(draft);
                    drop(guard);
                    tracing::info!("已添加照片: {} (id={})", name, id);
                    self.event_sink.emit_typed(
                        PHOTO_ADDED,
                        &PhotoEventPayload {
                            id,
                            file_name: name,
                        },
                    );
                    report.added.push(id);
                }
                Ok((guard, name, Err(e))) => {
                    tracing::warn!("导入失败: {} -> {}", name, e);
                    let id = self.record_failure(store, FailureDraft::from_error(name, &e));
                    drop(guard);
                    report.failed.push(id);
                }
                Err(e) => {
                    tracing::error!("导入任务异常终止: {}", e);
                    let err = AppError::from(e);
                    let id = self.record_failure(store, FailureDraft::from_error("unknown", &err));
                    report.failed.push(id);
                }
            }
        }

        report
    }

    fn record_failure(&self, store: &RwLock<GalleryStore>, draft: FailureDraft) -> PhotoId {
        let payload_name = draft.file_name.clone();
        let kind = draft.kind;
        let message = draft.message.clone();
        let id = store.write().record_failure(draft);
        self.event_sink.emit_typed(
            INGEST_FAILED,
            &FailureEventPayload {
                id,
                file_name: payload_name,
                kind,
                message,
            },
        );
        id
    }
}
