//! In-flight ingest tracking.
//!
//! Every accepted file is registered here while its pipeline runs, so a front
//! end can show which files are still being processed. Jobs cannot be
//! cancelled; they leave the tracker when the file lands in the gallery or in
//! the failure list.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

/// Unique identifier for an ingest job.
pub type JobId = u64;

/// Tracker for files whose ingest has started but not finished.
#[derive(Debug)]
pub struct IngestJobs {
    next_id: AtomicU64,
    jobs: RwLock<BTreeMap<JobId, String>>,
}

impl IngestJobs {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            jobs: RwLock::new(BTreeMap::new()),
        }
    }

    /// Register a file and return its job ID.
    pub fn start_job(&self, file_name: &str) -> JobId {
        let job_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.jobs.write().insert(job_id, file_name.to_string());
        job_id
    }

    /// Remove a finished job from tracking.
    pub fn complete_job(&self, job_id: JobId) {
        self.jobs.write().remove(&job_id);
    }

    /// Get the number of active jobs.
    pub fn active_job_count(&self) -> usize {
        self.jobs.read().len()
    }

    /// Check if a specific job is still active.
    pub fn is_job_active(&self, job_id: JobId) -> bool {
        self.jobs.read().contains_key(&job_id)
    }

    /// File names of active jobs, in start order.
    pub fn pending_files(&self) -> Vec<String> {
        self.jobs.read().values().cloned().collect()
    }
}

impl Default for IngestJobs {
    fn default() -> Self {
        Self::new()
    }
}
