//! Run orchestration.
//!
//! One run: prepare the output directory → discover links → fetch every link
//! with bounded concurrency → report per-link results.

mod parallel;
mod report;
mod setup;

pub use parallel::fetch_all;
pub use report::{LinkReport, RunReport};
pub use setup::{prepare_output_dir, SetupError};

use crate::config::DatasetConfig;
use crate::discovery::{self, DiscoveryError};
use crate::progress::{self, ProgressEvent, ProgressSender};

/// Failures that stop a run before any archive is fetched.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error("link discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),
}

/// Runs the whole dataset download described by `cfg`.
///
/// Individual fetch failures do not fail the run; they are listed in the
/// returned report. Progress and lifecycle events go to `progress_tx` when set.
pub async fn run_dataset(
    cfg: &DatasetConfig,
    progress_tx: Option<ProgressSender>,
) -> Result<RunReport, RunError> {
    let tx = progress_tx.as_ref();
    progress::emit(tx, ProgressEvent::RunStarted);

    prepare_output_dir(&cfg.output_dir).await?;

    let links = discovery::discover_links(cfg).await?;
    progress::emit(tx, ProgressEvent::LinksDiscovered { count: links.len() });

    let report = fetch_all(&links, cfg, tx).await;

    tracing::info!(
        downloaded = report.downloaded(),
        skipped = report.skipped(),
        failed = report.failed(),
        bytes = report.bytes_downloaded(),
        "run finished"
    );
    progress::emit(
        tx,
        ProgressEvent::RunFinished {
            downloaded: report.downloaded(),
            skipped: report.skipped(),
            failed: report.failed(),
        },
    );
    Ok(report)
}
