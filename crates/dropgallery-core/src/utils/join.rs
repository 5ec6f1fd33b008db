//! Fan-in helpers for concurrent sub-steps.

use std::future::Future;
use std::time::Duration;

use crate::utils::error::{AppError, AppResult};

/// Await two futures concurrently and resolve only once both have completed.
///
/// If the deadline passes first, both futures are dropped and
/// [`AppError::Timeout`] is returned for `name`. Blocking work already handed
/// to `spawn_blocking` keeps running in the background; its result is discarded.
pub async fn join_within<A, B>(
    name: &str,
    deadline: Duration,
    a: A,
    b: B,
) -> AppResult<(A::Output, B::Output)>
where
    A: Future,
    B: Future,
{
    match tokio::time::timeout(deadline, async { tokio::join!(a, b) }).await {
        Ok(both) => Ok(both),
        Err(_) => {
            tracing::warn!(task = name, timeout_ms = deadline.as_millis() as u64, "join deadline elapsed");
            Err(AppError::Timeout {
                name: name.to_string(),
                timeout_ms: deadline.as_millis() as u64,
            })
        }
    }
}
