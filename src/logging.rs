//! Logging for chart runs.
//!
//! Chart renders run as batch jobs, so the log is the only progress surface:
//! one line when a dataset lands in memory, one line per timed stage.

use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use crate::data_loader::Metadata;

/// Initialize the tracing subscriber. `RUST_LOG` overrides the CLI level.
pub fn init_tracing(log_level: &str) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Run one pipeline stage and log its wall-clock duration.
pub fn time_stage<F, R>(stage: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    debug!(stage = stage, "Stage started");
    let start = Instant::now();

    let result = f();

    info!(
        stage = stage,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Stage finished"
    );
    result
}

/// One summary line per loaded dataset: its variables, dimensions, and the
/// in-memory footprint of the data arrays.
pub fn log_dataset_summary(path: &Path, metadata: &Metadata, data_bytes: usize) {
    let mut vars: Vec<&str> = metadata.variables.keys().map(String::as_str).collect();
    vars.sort_unstable();

    let mut dims: Vec<String> = metadata
        .dimensions
        .values()
        .map(|d| format!("{}={}", d.name, d.size))
        .collect();
    dims.sort_unstable();

    info!(
        file = %path.display(),
        vars = vars.join(", "),
        dims = dims.join(", "),
        data_kb = data_bytes / 1024,
        "Dataset loaded"
    );
}
