//! 图库状态
//!
//! 内存中的有序照片列表，外加一个处理失败的文件列表。插入顺序即显示顺序。

use chrono::Utc;

use crate::models::photo::{FailureDraft, IngestFailure, PhotoDraft, PhotoId, PhotoRecord};

/// 图库状态
#[derive(Debug)]
pub struct GalleryStore {
    photos: Vec<PhotoRecord>,
    failures: Vec<IngestFailure>,
    next_id: u64,
}

impl GalleryStore {
    pub fn new() -> Self {
        Self {
            photos: Vec::new(),
            failures: Vec::new(),
            next_id: 1,
        }
    }

    /// 分配新 ID（照片和失败记录共用，单调递增）
    fn allocate_id(&mut self) -> PhotoId {
        let id = PhotoId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// 追加照片，返回分配的 ID
    pub fn insert(&mut self, draft: PhotoDraft) -> PhotoId {
        let id = self.allocate_id();
        self.photos.push(PhotoRecord::from_draft(id, draft, Utc::now()));
        id
    }

    /// 按 ID 删除照片；不存在时什么也不做
    pub fn remove(&mut self, id: PhotoId) -> Option<PhotoRecord> {
        let index = self.photos.iter().position(|p| p.id == id)?;
        Some(self.photos.remove(index))
    }

    pub fn get(&self, id: PhotoId) -> Option<&PhotoRecord> {
        self.photos.iter().find(|p| p.id == id)
    }

    /// 当前照片列表（按插入顺序）
    pub fn snapshot(&self) -> &[PhotoRecord] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// 记录处理失败的文件
    pub fn record_failure(&mut self, draft: FailureDraft) -> PhotoId {
        let id = self.allocate_id();
        self.failures.push(IngestFailure {
            id,
            file_name: draft.file_name,
            kind: draft.kind,
            message: draft.message,
            failed_at: Utc::now(),
        });
        id
    }

    pub fn failures(&self) -> &[IngestFailure] {
        &self.failures
    }

    /// 移除失败记录
    pub fn dismiss_failure(&mut self, id: PhotoId) -> bool {
        let before = self.failures.len();
        self.failures.retain(|f| f.id != id);
        self.failures.len() != before
    }
}

impl Default for GalleryStore {
    fn default() -> Self {
        Self::new()
    }
}
