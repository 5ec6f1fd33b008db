//! 图库命令

use std::path::PathBuf;

use dropgallery_core::{AppError, CommandError, IngestFailure, IngestReport, PhotoId, PhotoRecord};

use crate::AppState;

/// 拖入文件或目录
pub async fn drop_files(
    state: &AppState,
    paths: Vec<PathBuf>,
) -> Result<IngestReport, CommandError> {
    if paths.is_empty() {
        return Err(AppError::General("没有拖入任何文件".to_string()).into());
    }

    Ok(state.core.drop_paths(paths).await)
}

/// 获取图库中的全部照片（按加入顺序）
pub fn list_photos(state: &AppState) -> Vec<PhotoRecord> {
    state.core.snapshot()
}

/// 获取单张照片
pub fn get_photo(state: &AppState, id: PhotoId) -> Result<PhotoRecord, CommandError> {
    state
        .core
        .photo(id)
        .ok_or_else(|| AppError::NotFound(format!("照片 {}", id)).into())
}

/// 删除照片，ID 不存在时返回 false
pub fn delete_photo(state: &AppState, id: PhotoId) -> bool {
    state.core.remove_photo(id).is_some()
}

/// 获取导入失败的文件
pub fn list_failures(state: &AppState) -> Vec<IngestFailure> {
    state.core.failures()
}

/// 移除一条失败记录
pub fn dismiss_failure(state: &AppState, id: PhotoId) -> bool {
    state.core.dismiss_failure(id)
}

/// 仍在处理中的文件
///
/// 只有在导入进行期间从另一个任务调用才会非空；`execute` 等整批完成后才渲染，不经过这里。
pub fn pending_files(state: &AppState) -> Vec<String> {
    state.core.pending_files()
}
