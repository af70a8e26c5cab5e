//! Progress events sent from the fetch tasks to whoever renders them.
//!
//! The core never writes to the terminal; the CLI drains the channel and
//! draws one bar per archive.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::url_model::Link;

/// The indicator counts in groups of this many bytes.
pub const BYTES_PER_UNIT: u64 = 8;

/// Minimum spacing between two `Advanced` events of one task.
pub const ADVANCE_INTERVAL: Duration = Duration::from_millis(100);

/// Position in discovery order of the link a task is fetching.
pub type TaskId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// The run began; nothing has been fetched yet.
    RunStarted,
    /// Discovery finished with `count` links.
    LinksDiscovered { count: usize },
    /// Headers arrived; `total_bytes` is the declared `Content-Length`.
    FetchStarted {
        task: TaskId,
        link: Link,
        destination: PathBuf,
        total_bytes: u64,
    },
    /// Body bytes written so far (coalesced, see [`ADVANCE_INTERVAL`]).
    Advanced { task: TaskId, bytes_done: u64 },
    /// Destination already present and skipping is enabled. No request was made.
    Skipped {
        task: TaskId,
        link: Link,
        destination: PathBuf,
    },
    Finished { task: TaskId, bytes: u64 },
    Failed { task: TaskId, link: Link, error: String },
    /// Every task has completed.
    RunFinished {
        downloaded: usize,
        skipped: usize,
        failed: usize,
    },
}

pub type ProgressSender = tokio::sync::mpsc::UnboundedSender<ProgressEvent>;
pub type ProgressReceiver = tokio::sync::mpsc::UnboundedReceiver<ProgressEvent>;

/// Send an event if anyone is listening. A closed receiver is not an error.
pub(crate) fn emit(tx: Option<&ProgressSender>, event: ProgressEvent) {
    if let Some(tx) = tx {
        let _ = tx.send(event);
    }
}

/// Converts a byte count into indicator units.
pub fn indicator_units(bytes: u64) -> u64 {
    bytes / BYTES_PER_UNIT
}

/// Rate limiter for `Advanced` events of a single task.
#[derive(Debug)]
pub(crate) struct AdvanceThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl AdvanceThrottle {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// True when an event should go out now. The final chunk always passes.
    pub(crate) fn ready(&mut self, now: Instant, done: u64, total: u64) -> bool {
        let due = match self.last {
            None => true,
            Some(last) => now.duration_since(last) >= self.interval,
        };
        if due || done >= total {
            self.last = Some(now);
            return true;
        }
        false
    }
}
