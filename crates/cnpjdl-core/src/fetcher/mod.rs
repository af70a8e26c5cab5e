//! Fetcher: streams one archive link into the output directory.
//!
//! Destination is `{output_dir}/{last path segment of the link}`. With
//! skip-existing enabled an already present destination is left untouched and
//! no request is made.

mod error;
mod headers;
mod transfer;

pub use error::FetchError;

use std::path::{Path, PathBuf};

use crate::progress::{ProgressSender, TaskId};
use crate::url_model::{destination_path, Link};

/// What happened to one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Destination existed and skip-existing is on.
    Skipped { path: PathBuf },
    /// The whole body was written.
    Downloaded { path: PathBuf, bytes: u64 },
}

impl FetchOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FetchOutcome::Skipped { path } | FetchOutcome::Downloaded { path, .. } => path,
        }
    }
}

/// Fetches `link` into `output_dir`. `task` tags the progress events.
pub async fn fetch(
    link: &Link,
    output_dir: &Path,
    skip_existing: bool,
    task: TaskId,
    progress: Option<ProgressSender>,
) -> Result<FetchOutcome, FetchError> {
    let destination = destination_path(output_dir, link.url())
        .ok_or_else(|| FetchError::NoFileName(link.to_string()))?;

    if skip_existing && tokio::fs::try_exists(&destination).await? {
        tracing::info!(%link, destination = %destination.display(), "destination exists, skipping");
        return Ok(FetchOutcome::Skipped { path: destination });
    }

    let bytes = tokio::task::spawn_blocking({
        let link = link.clone();
        let destination = destination.clone();
        move || transfer::stream_to_file(&link, &destination, task, progress.as_ref())
    })
    .await??;

    tracing::info!(%link, destination = %destination.display(), bytes, "archive downloaded");
    Ok(FetchOutcome::Downloaded {
        path: destination,
        bytes,
    })
}
