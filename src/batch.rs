//! Parallel fan-out over container files.
//!
//! Each file is handled end-to-end by one worker. A failure is logged and
//! collected; it never stops the other files.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Per-file results of a batch run, in input order.
#[derive(Debug)]
pub struct BatchOutcome<T> {
    pub succeeded: Vec<(PathBuf, T)>,
    pub failed: Vec<(PathBuf, anyhow::Error)>,
}

impl<T> BatchOutcome<T> {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Ok with the successes, or an error naming the failure count.
    pub fn into_result(self) -> Result<Vec<(PathBuf, T)>> {
        if self.failed.is_empty() {
            Ok(self.succeeded)
        } else {
            anyhow::bail!("{} of {} files failed", self.failed.len(), self.total())
        }
    }
}

/// Run `task` on every file using `jobs` worker threads.
pub fn run_batch<T, F>(files: &[PathBuf], jobs: usize, task: F) -> Result<BatchOutcome<T>>
where
    T: Send,
    F: Fn(&Path) -> Result<T> + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.max(1))
        .thread_name(|idx| format!("mkvkit-worker-{}", idx))
        .build()
        .context("Failed to create worker pool")?;

    tracing::debug!("Processing {} files on {} workers", files.len(), jobs.max(1));

    let results: Vec<(PathBuf, Result<T>)> = pool.install(|| {
        files
            .par_iter()
            .map(|file| (file.clone(), task(file.as_path())))
            .collect()
    });

    let mut outcome = BatchOutcome {
        succeeded: Vec::new(),
        failed: Vec::new(),
    };
    for (file, result) in results {
        match result {
            Ok(value) => outcome.succeeded.push((file, value)),
            Err(e) => {
                tracing::warn!("{}: {:#}", file.display(), e);
                outcome.failed.push((file, e));
            }
        }
    }

    Ok(outcome)
}
