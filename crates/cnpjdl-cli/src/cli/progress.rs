//! Terminal rendering of core progress events: one bar per archive plus
//! lifecycle lines printed above the bars.

use std::collections::HashMap;

use anyhow::{Context, Result};
use cnpjdl_core::progress::{indicator_units, ProgressEvent, ProgressReceiver, TaskId};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

const BAR_TEMPLATE: &str = "{msg} [{bar:40.cyan/blue}] {percent:>3}% {pos}/{len}";

pub struct ProgressRenderer {
    multi: MultiProgress,
    style: ProgressStyle,
    bars: HashMap<TaskId, ProgressBar>,
}

impl ProgressRenderer {
    pub fn new() -> Result<Self> {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    pub fn with_target(target: ProgressDrawTarget) -> Result<Self> {
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .context("invalid progress bar template")?
            .progress_chars("━━╸");
        Ok(Self {
            multi: MultiProgress::with_draw_target(target),
            style,
            bars: HashMap::new(),
        })
    }

    /// Drains `rx` until every sender is dropped.
    pub async fn run(mut self, mut rx: ProgressReceiver) {
        while let Some(event) = rx.recv().await {
            self.handle(event);
        }
        self.bars.clear();
    }

    fn handle(&mut self, event: ProgressEvent) {
        match event {
            ProgressEvent::RunStarted => {
                self.announce("Starting to fetch files to build the dataset");
            }
            ProgressEvent::LinksDiscovered { count } => {
                tracing::debug!(count, "links discovered");
            }
            ProgressEvent::FetchStarted {
                task,
                link,
                total_bytes,
                ..
            } => {
                let bar = self
                    .multi
                    .add(ProgressBar::new(indicator_units(total_bytes)));
                bar.set_style(self.style.clone());
                bar.set_message(link.to_string());
                self.bars.insert(task, bar);
            }
            ProgressEvent::Advanced { task, bytes_done } => {
                if let Some(bar) = self.bars.get(&task) {
                    bar.set_position(indicator_units(bytes_done));
                }
            }
            ProgressEvent::Skipped { destination, .. } => {
                self.announce(&destination.display().to_string());
            }
            ProgressEvent::Finished { task, bytes } => {
                if let Some(bar) = self.bars.get(&task) {
                    bar.set_position(indicator_units(bytes));
                    bar.finish();
                }
            }
            ProgressEvent::Failed { task, link, error } => {
                match self.bars.get(&task) {
                    Some(bar) => bar.abandon_with_message(format!("{} (failed)", link)),
                    None => self.announce(&format!("{}: {}", link, error)),
                }
            }
            ProgressEvent::RunFinished {
                downloaded,
                skipped,
                failed,
            } => {
                self.announce(&format!(
                    "Files retrieved: {} downloaded, {} skipped, {} failed",
                    downloaded, skipped, failed
                ));
            }
        }
    }

    fn announce(&self, line: &str) {
        self.multi.suspend(|| println!("{}", line));
    }

    #[cfg(test)]
    fn bar(&self, task: TaskId) -> Option<&ProgressBar> {
        self.bars.get(&task)
    }
}
