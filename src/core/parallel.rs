//! Parallel batch processing utilities

use crate::error::{Result, TangleError};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Pipeline phases reported through the progress callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    /// Walking the tree for analyzable files
    Discovering,
    /// Parsing and extracting imports, batch by batch
    Parsing,
    /// Resolving edges and running cycle detection
    Analyzing,
}

/// One progress update
///
/// `current` is monotonic within the parsing phase; the discovering and
/// analyzing phases carry no counts.
#[derive(Debug, Clone, Copy)]
pub struct ProgressEvent {
    pub phase: AnalysisPhase,
    pub current: usize,
    pub total: usize,
}

impl ProgressEvent {
    pub fn phase(phase: AnalysisPhase) -> Self {
        Self {
            phase,
            current: 0,
            total: 0,
        }
    }

    pub fn parsing(current: usize, total: usize) -> Self {
        Self {
            phase: AnalysisPhase::Parsing,
            current,
            total,
        }
    }
}

/// Callback invoked with progress events on the driving thread
pub type ProgressCallback = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

/// Process items in fixed-size parallel batches
///
/// Within a batch items run concurrently on the rayon pool; between batches
/// `after_batch` is invoked with the processed count. Output order matches
/// input order. When the cancellation flag is raised no new batch starts and
/// the partial results are discarded.
pub fn process_in_batches<T, R, F>(
    items: Vec<T>,
    batch_size: usize,
    cancel: Option<&AtomicBool>,
    mut after_batch: impl FnMut(usize, usize),
    f: F,
) -> Result<Vec<R>>
where
    T: Send,
    R: Send,
    F: Fn(T) -> R + Send + Sync,
{
    let total = items.len();
    let batch_size = batch_size.max(1);
    let mut results = Vec::with_capacity(total);
    let mut processed = 0;
    let mut pending = items.into_iter();

    loop {
        let batch: Vec<T> = pending.by_ref().take(batch_size).collect();
        if batch.is_empty() {
            break;
        }

        if let Some(flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(TangleError::Interrupted);
            }
        }

        let mut batch_results: Vec<R> = batch.into_par_iter().map(&f).collect();
        processed += batch_results.len();
        results.append(&mut batch_results);
        after_batch(processed, total);
    }

    Ok(results)
}
