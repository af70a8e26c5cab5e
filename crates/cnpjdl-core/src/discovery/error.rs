//! Link discovery error type.

/// Failure to produce the archive link list. Every variant is fatal to a run.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("invalid index URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("GET {url} failed: {source}")]
    Curl {
        url: String,
        #[source]
        source: curl::Error,
    },
    #[error("GET {url} returned HTTP {code}")]
    Http { url: String, code: u32 },
    #[error("no element with id `{0}` on the index page")]
    ContainerNotFound(String),
    #[error("invalid container selector `{0}`")]
    Selector(String),
    #[error("invalid archive pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("index fetch task: {0}")]
    Join(#[from] tokio::task::JoinError),
}
