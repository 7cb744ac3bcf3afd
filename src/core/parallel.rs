//! Parallel processing utilities

use crate::error::{DsmError, Result};
use parking_lot::Mutex;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

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

/// Shared flag checked at every module and package boundary
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; every clone observes it
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fail with `Cancelled` once cancellation was requested
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(DsmError::Cancelled { completed_modules: 0 })
        } else {
            Ok(())
        }
    }
}

/// Apply `f` to every item, in parallel when asked, reporting progress
/// after each item. Results keep the input order; the first error wins.
pub fn process_with_progress<T, F, R, P>(
    items: Vec<T>,
    parallel: bool,
    label: &str,
    f: F,
    progress_callback: &P,
) -> Result<Vec<R>>
where
    T: Send,
    R: Send,
    F: Fn(T) -> Result<R> + Send + Sync,
    P: Fn(ProgressUpdate) + Send + Sync,
{
    let total = items.len();
    let counter = Mutex::new(0usize);

    let run = |item: T| -> Result<R> {
        let result = f(item)?;

        let count = {
            let mut count = counter.lock();
            *count += 1;
            *count
        };
        progress_callback(ProgressUpdate::new(count, total, format!("{} {}/{}", label, count, total)));

        Ok(result)
    };

    if parallel {
        items.into_par_iter().map(run).collect()
    } else {
        items.into_iter().map(run).collect()
    }
}

/// Build a rayon pool sized for the analysis
pub fn build_thread_pool(threads: usize) -> Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|index| format!("dsm-worker-{}", index))
        .build()
        .map_err(|e| DsmError::ParallelExecution {
            message: e.to_string(),
        })
}
