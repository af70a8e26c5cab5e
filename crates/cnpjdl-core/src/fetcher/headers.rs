//! Tracks the response head as curl hands over header lines.

use super::FetchError;

/// Status and declared length of the response currently being received.
///
/// With redirects followed, curl reports the headers of every hop; a new
/// status line starts a fresh head so only the final response counts.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct ResponseHead {
    pub(crate) status: Option<u32>,
    content_length: Option<String>,
}

impl ResponseHead {
    /// Feed one raw header line (CRLF included or not).
    pub(crate) fn observe(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if line.starts_with("HTTP/") {
            *self = ResponseHead {
                status: line
                    .split_whitespace()
                    .nth(1)
                    .and_then(|code| code.parse::<u32>().ok()),
                content_length: None,
            };
            return;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                self.content_length = Some(value.trim().to_string());
            }
        }
    }

    /// Declared body size. Absent or unparsable headers are errors.
    pub(crate) fn content_length(&self) -> Result<u64, FetchError> {
        match self.content_length.as_deref() {
            None => Err(FetchError::MissingContentLength),
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| FetchError::InvalidContentLength(raw.to_string())),
        }
    }

    pub(crate) fn is_success(&self) -> bool {
        matches!(self.status, Some(code) if (200..300).contains(&code))
    }
}
