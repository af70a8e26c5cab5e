//! Per-archive fetch error type.

/// Why one archive could not be fetched. Reported per link; never aborts sibling tasks.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The link's path has no usable last segment to name the file after.
    #[error("link has no file name: {0}")]
    NoFileName(String),
    /// Curl reported an error (connection, timeout, too many redirects, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Final response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// The server did not declare the body size, so progress cannot be sized.
    #[error("response has no Content-Length header")]
    MissingContentLength,
    #[error("invalid Content-Length header: {0:?}")]
    InvalidContentLength(String),
    /// Body ended before (or after) the declared size.
    #[error("partial transfer: expected {expected} bytes, got {received}")]
    PartialTransfer { expected: u64, received: u64 },
    /// Destination could not be created or written.
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
    #[error("fetch task: {0}")]
    Join(#[from] tokio::task::JoinError),
    /// The task running this fetch ended (panicked) before reporting.
    #[error("fetch task ended without a result")]
    TaskLost,
}
