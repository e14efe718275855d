//! Indexing throughput instrumentation
//!
//! Purely observational: the wrapped pipeline's report and error pass
//! through unchanged.

use crate::index::pipeline::IndexReport;
use crate::index::IndexError;
use std::time::Instant;

/// Runs the pipeline closure, logging elapsed time and per-document average
pub fn run_timed<F>(pipeline: F) -> Result<IndexReport, IndexError>
where
    F: FnOnce() -> Result<IndexReport, IndexError>,
{
    let started = Instant::now();
    let result = pipeline();
    let elapsed = started.elapsed();

    match &result {
        Ok(report) => {
            let per_document_ms = if report.documents > 0 {
                elapsed.as_secs_f64() * 1000.0 / report.documents as f64
            } else {
                0.0
            };
            tracing::info!(
                "Indexed {} documents in {:.2}s across {} batches (average {:.2} ms/document)",
                report.documents,
                elapsed.as_secs_f64(),
                report.batches,
                per_document_ms
            );
        }
        Err(e) => {
            tracing::error!("Indexing failed after {:.2}s: {}", elapsed.as_secs_f64(), e);
        }
    }

    result
}
