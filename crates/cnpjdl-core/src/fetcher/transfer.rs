//! Single-stream HTTP GET of one archive into its destination file.

use std::cell::RefCell;
use std::path::Path;
use std::str;
use std::time::{Duration, Instant};

use super::headers::ResponseHead;
use super::FetchError;
use crate::progress::{self, AdvanceThrottle, ProgressEvent, ProgressSender, TaskId};
use crate::storage::StorageWriter;
use crate::url_model::Link;

/// Receives body chunks. The destination is only opened once the final
/// response is known to be a 2xx with a declared length.
struct BodySink<'a> {
    task: TaskId,
    link: &'a Link,
    destination: &'a Path,
    progress: Option<&'a ProgressSender>,
    writer: Option<StorageWriter>,
    total: u64,
    throttle: AdvanceThrottle,
    abort: Option<FetchError>,
}

impl<'a> BodySink<'a> {
    fn open(&mut self, head: &ResponseHead) -> Result<(), FetchError> {
        if !head.is_success() {
            return Err(FetchError::Http(head.status.unwrap_or(0)));
        }
        let total = head.content_length()?;
        let writer = StorageWriter::create(self.destination)?;
        tracing::debug!(
            link = %self.link,
            destination = %self.destination.display(),
            total,
            "streaming archive"
        );
        progress::emit(
            self.progress,
            ProgressEvent::FetchStarted {
                task: self.task,
                link: self.link.clone(),
                destination: self.destination.to_path_buf(),
                total_bytes: total,
            },
        );
        self.total = total;
        self.writer = Some(writer);
        Ok(())
    }

    fn accept(&mut self, head: &ResponseHead, data: &[u8]) -> Result<(), FetchError> {
        if self.writer.is_none() {
            self.open(head)?;
        }
        if let Some(writer) = self.writer.as_mut() {
            writer.append(data)?;
            let done = writer.written();
            if self.throttle.ready(Instant::now(), done, self.total) {
                progress::emit(
                    self.progress,
                    ProgressEvent::Advanced {
                        task: self.task,
                        bytes_done: done,
                    },
                );
            }
        }
        Ok(())
    }
}

/// Streams `link` into `destination`, creating or truncating it.
/// Returns the number of bytes written.
///
/// A failure after the first chunk leaves the partial file in place.
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub(crate) fn stream_to_file(
    link: &Link,
    destination: &Path,
    task: TaskId,
    progress: Option<&ProgressSender>,
) -> Result<u64, FetchError> {
    let head = RefCell::new(ResponseHead::default());
    let sink = RefCell::new(BodySink {
        task,
        link,
        destination,
        progress,
        writer: None,
        total: 0,
        throttle: AdvanceThrottle::new(progress::ADVANCE_INTERVAL),
        abort: None,
    });

    let mut easy = curl::easy::Easy::new();
    easy.url(link.as_str())?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(30))?;
    // No wall-clock timeout: only abort when throughput stays under 1 KiB/s for 60s.
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(Duration::from_secs(60))?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(line) = str::from_utf8(data) {
                head.borrow_mut().observe(line);
            }
            true
        })?;
        transfer.write_function(|data| {
            let mut sink = sink.borrow_mut();
            match sink.accept(&head.borrow(), data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    sink.abort = Some(e);
                    Ok(0) // abort transfer
                }
            }
        })?;
        if let Err(e) = transfer.perform() {
            if e.is_write_error() {
                if let Some(reason) = sink.borrow_mut().abort.take() {
                    return Err(reason);
                }
            }
            // curl ends a body shorter than Content-Length with a partial-file error.
            if e.is_partial_file() {
                let sink = sink.borrow();
                let expected = match sink.writer.as_ref() {
                    Some(_) => Some(sink.total),
                    None if head.borrow().is_success() => head.borrow().content_length().ok(),
                    None => None,
                };
                if let Some(expected) = expected {
                    return Err(FetchError::PartialTransfer {
                        expected,
                        received: sink.writer.as_ref().map_or(0, |w| w.written()),
                    });
                }
            }
            return Err(FetchError::Curl(e));
        }
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }

    let mut sink = sink.into_inner();
    if sink.writer.is_none() {
        // Empty body: the write callback never ran.
        sink.open(&head.borrow())?;
    }
    let Some(writer) = sink.writer.take() else {
        return Err(FetchError::MissingContentLength);
    };
    writer.sync()?;

    let received = writer.written();
    if received != sink.total {
        return Err(FetchError::PartialTransfer {
            expected: sink.total,
            received,
        });
    }
    Ok(received)
}
