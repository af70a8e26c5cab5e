//! Fetch all discovered links with a bounded number in flight.
//!
//! Keeps up to `max_concurrent` fetches running at once; when one finishes,
//! the next link is started until the list is exhausted. A failed fetch does
//! not cancel the others.

use std::path::PathBuf;

use crate::config::DatasetConfig;
use crate::fetcher::{self, FetchError, FetchOutcome};
use crate::progress::{self, ProgressEvent, ProgressSender, TaskId};
use crate::url_model::Link;

use super::report::{LinkReport, RunReport};

/// Runs one fetch per link, at most `cfg.effective_concurrency(links.len())`
/// at a time, and collects every result in discovery order.
pub async fn fetch_all(
    links: &[Link],
    cfg: &DatasetConfig,
    progress_tx: Option<&ProgressSender>,
) -> RunReport {
    let max_concurrent = cfg.effective_concurrency(links.len());
    tracing::debug!(links = links.len(), max_concurrent, "starting fetches");

    let mut results: Vec<Option<Result<FetchOutcome, FetchError>>> =
        links.iter().map(|_| None).collect();
    let mut pending = links.iter().cloned().enumerate();
    let mut join_set = tokio::task::JoinSet::new();

    loop {
        while join_set.len() < max_concurrent {
            let Some((task, link)) = pending.next() else {
                break;
            };
            let output_dir = cfg.output_dir.clone();
            let skip_existing = cfg.skip_existing;
            let tx = progress_tx.cloned();
            join_set.spawn(async move {
                let res = fetch_one(task, link, output_dir, skip_existing, tx).await;
                (task, res)
            });
        }

        let Some(joined) = join_set.join_next().await else {
            break;
        };
        match joined {
            Ok((task, res)) => results[task] = Some(res),
            Err(e) => tracing::error!("fetch task join: {}", e),
        }
    }

    let entries = links
        .iter()
        .cloned()
        .zip(results)
        .enumerate()
        .map(|(task, (link, result))| LinkReport {
            task,
            link,
            result: result.unwrap_or(Err(FetchError::TaskLost)),
        })
        .collect();
    RunReport { entries }
}

async fn fetch_one(
    task: TaskId,
    link: Link,
    output_dir: PathBuf,
    skip_existing: bool,
    tx: Option<ProgressSender>,
) -> Result<FetchOutcome, FetchError> {
    let res = fetcher::fetch(&link, &output_dir, skip_existing, task, tx.clone()).await;
    let event = match &res {
        Ok(FetchOutcome::Skipped { path }) => ProgressEvent::Skipped {
            task,
            link,
            destination: path.clone(),
        },
        Ok(FetchOutcome::Downloaded { bytes, .. }) => ProgressEvent::Finished {
            task,
            bytes: *bytes,
        },
        Err(e) => {
            tracing::warn!(%link, error = %e, "fetch failed");
            ProgressEvent::Failed {
                task,
                link,
                error: e.to_string(),
            }
        }
    };
    progress::emit(tx.as_ref(), event);
    res
}
