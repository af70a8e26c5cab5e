//! Filename extraction from URL path.

use std::path::{Path, PathBuf};
use url::Url;

/// Extracts the last path segment from a URL for use as a filename.
///
/// Returns `None` if the path is empty/root or ends in a dot segment. The
/// segment stays percent-encoded, so it never contains `/`.
pub fn filename_from_url_path(url: &Url) -> Option<String> {
    let segment = url.path().split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// `{output_dir}/{last path segment of url}`, or `None` when the URL names no file.
pub fn destination_path(output_dir: &Path, url: &Url) -> Option<PathBuf> {
    filename_from_url_path(url).map(|name| output_dir.join(name))
}
