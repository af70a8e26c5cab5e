//! `cnpjdl fetch` – discover the archive links and download every archive.

use anyhow::Result;
use cnpjdl_core::config::DatasetConfig;
use cnpjdl_core::scheduler::{self, RunError, RunReport, SetupError};

use crate::cli::progress::ProgressRenderer;

/// Exit status when the output path exists and is not a directory.
pub const EXIT_OUTPUT_NOT_A_DIRECTORY: i32 = -1;
/// Exit status when at least one archive failed.
pub const EXIT_FETCH_FAILURES: i32 = 1;

/// Runs one dataset download and returns the process exit code.
pub async fn run_fetch(cfg: DatasetConfig) -> Result<i32> {
    let (progress_tx, progress_rx) = tokio::sync::mpsc::unbounded_channel();
    let renderer = ProgressRenderer::new()?;
    let progress_handle = tokio::spawn(renderer.run(progress_rx));

    let result = scheduler::run_dataset(&cfg, Some(progress_tx)).await;
    if let Err(err) = progress_handle.await {
        tracing::warn!("progress renderer: {}", err);
    }

    exit_code(result)
}

/// Maps the outcome of a run to the process exit code. Failures that stop the
/// run before fetching, other than an unusable output path, stay errors.
pub fn exit_code(result: Result<RunReport, RunError>) -> Result<i32> {
    match result {
        Err(RunError::Setup(err @ SetupError::NotADirectory(_))) => {
            eprintln!("{}", err);
            Ok(EXIT_OUTPUT_NOT_A_DIRECTORY)
        }
        Err(err) => Err(err.into()),
        Ok(report) => {
            for (link, err) in report.failures() {
                eprintln!("failed: {}: {}", link, err);
            }
            if report.is_success() {
                Ok(0)
            } else {
                tracing::warn!("{} of {} archive(s) failed", report.failed(), report.len());
                Ok(EXIT_FETCH_FAILURES)
            }
        }
    }
}
