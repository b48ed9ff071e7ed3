//! Parallel source loading
//!
//! Only file reading runs concurrently. Results come back in input order so
//! the model build that follows stays a sequential pass.

use crate::core::walker::SourceFile;
use crate::error::{PacktreeError, Result};
use rayon::prelude::*;
use std::path::PathBuf;
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

/// Outcome of loading one path
pub type LoadResult = (PathBuf, Result<SourceFile>);

/// Read files one after another
pub fn load_sequential<P>(paths: Vec<PathBuf>, progress: P) -> Vec<LoadResult>
where
    P: Fn(ProgressUpdate),
{
    let total = paths.len();
    paths
        .into_iter()
        .enumerate()
        .map(|(index, path)| {
            let loaded = SourceFile::load(&path);
            progress(ProgressUpdate::new(index + 1, total, path.display().to_string()));
            (path, loaded)
        })
        .collect()
}

/// Read files on a dedicated rayon pool of `threads` workers
///
/// `threads` of `None` uses one worker per CPU.
pub fn load_parallel<P>(
    paths: Vec<PathBuf>,
    threads: Option<usize>,
    progress: P,
) -> Result<Vec<LoadResult>>
where
    P: Fn(ProgressUpdate) + Send + Sync,
{
    let threads = threads.unwrap_or_else(num_cpus::get).max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| PacktreeError::ParallelExecution {
            message: e.to_string(),
        })?;

    let total = paths.len();
    let counter = AtomicUsize::new(0);
    tracing::debug!(threads, files = total, "loading sources in parallel");

    Ok(pool.install(|| {
        paths
            .into_par_iter()
            .map(|path| {
                let loaded = SourceFile::load(&path);
                let current = counter.fetch_add(1, Ordering::Relaxed) + 1;
                progress(ProgressUpdate::new(current, total, path.display().to_string()));
                (path, loaded)
            })
            .collect()
    }))
}
