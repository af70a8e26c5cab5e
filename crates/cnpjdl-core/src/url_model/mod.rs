//! Archive links and the local filenames derived from them.

mod path;

pub use path::{destination_path, filename_from_url_path};

use std::fmt;
use url::Url;

/// Absolute URI of one downloadable archive, as discovered on the index page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link(Url);

impl Link {
    /// Parses an absolute URI.
    pub fn parse(uri: &str) -> Result<Self, url::ParseError> {
        Url::parse(uri).map(Link)
    }

    /// Resolves `href` against the page it was found on. Absolute hrefs are
    /// kept as they are.
    pub fn resolve(base: &Url, href: &str) -> Result<Self, url::ParseError> {
        base.join(href.trim()).map(Link)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn url(&self) -> &Url {
        &self.0
    }

    /// Last non-empty path segment, used as the archive's local filename.
    pub fn file_name(&self) -> Option<String> {
        filename_from_url_path(&self.0)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<Url> for Link {
    fn from(url: Url) -> Self {
        Link(url)
    }
}
