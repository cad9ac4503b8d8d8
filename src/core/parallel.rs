//! Parallel processing utilities

use crate::error::{Result, RippleError};
use rayon::prelude::*;
use rayon::ThreadPool;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Progress update information for parallel operations
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub current: usize,
    pub total: usize,
    pub message: String,
}

impl ProgressUpdate {
    /// Create a new progress update
    pub fn new(current: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            current,
            total,
            message: message.into(),
        }
    }

    /// Calculate progress percentage
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.current as f64 / self.total as f64) * 100.0
        }
    }
}

/// Dedicated pool with at most `workers` threads
pub fn bounded_pool(workers: usize) -> Result<ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .thread_name(|idx| format!("ripple-read-{}", idx))
        .build()
        .map_err(|err| RippleError::analysis_error(format!("failed to start worker pool: {}", err)))
}

/// Run `f` over `items` inside `pool`, reporting each completion
///
/// Output order matches input order.
pub fn process_with_progress<T, R, F, P>(pool: &ThreadPool, items: &[T], f: F, progress: P) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Send + Sync,
    P: Fn(ProgressUpdate) + Send + Sync,
{
    let total = items.len();
    let done = AtomicUsize::new(0);

    pool.install(|| {
        items
            .par_iter()
            .map(|item| {
                let result = f(item);
                let current = done.fetch_add(1, Ordering::SeqCst) + 1;
                progress(ProgressUpdate::new(
                    current,
                    total,
                    format!("Analyzed {}/{} files", current, total),
                ));
                result
            })
            .collect()
    })
}
