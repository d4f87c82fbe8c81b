use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::model::{BatchResult, DocumentResult};

/// Runs `work` over every job on the rayon pool.
///
/// Results keep the input order. A document's failure is recorded on its own
/// result and never affects the others.
pub fn run_batch<T, F>(jobs: &[T], work: F) -> BatchResult
where
    T: Sync,
    F: Fn(&T) -> DocumentResult + Sync,
{
    let documents = jobs.par_iter().map(&work).collect::<Vec<DocumentResult>>();

    for document in documents.iter().filter(|document| !document.success) {
        warn!(
            source = %document.source,
            diagnostic = document.diagnostic.as_deref().unwrap_or("unknown failure"),
            "document produced no records"
        );
    }

    let records = documents
        .iter()
        .flat_map(|document| document.records.iter().cloned())
        .collect::<Vec<_>>();

    let result = BatchResult { documents, records };
    info!(
        documents = result.documents.len(),
        succeeded = result.succeeded(),
        records = result.records.len(),
        "batch complete"
    );
    result
}

/// Same as [`run_batch`] on a dedicated pool of `threads` workers.
pub fn run_batch_with_threads<T, F>(jobs: &[T], threads: usize, work: F) -> Result<BatchResult>
where
    T: Sync,
    F: Fn(&T) -> DocumentResult + Sync + Send,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("failed to build extraction thread pool")?;

    Ok(pool.install(|| run_batch(jobs, work)))
}
