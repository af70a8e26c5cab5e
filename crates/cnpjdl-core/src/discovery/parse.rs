//! Extract archive links from the index page HTML.

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use super::DiscoveryError;
use crate::config::DatasetConfig;
use crate::url_model::Link;

/// Where archive links live on the index page and what their hrefs look like.
#[derive(Debug, Clone)]
pub struct LinkPattern {
    container_id: String,
    archive: Regex,
}

impl LinkPattern {
    /// Matches hrefs containing `<prefix>_<digits>.zip` (case-sensitive) inside
    /// the element whose id is `container_id`.
    pub fn new(container_id: &str, archive_prefix: &str) -> Result<Self, DiscoveryError> {
        let archive = Regex::new(&format!(r"{}_\d+\.zip", regex::escape(archive_prefix)))?;
        Ok(Self {
            container_id: container_id.to_string(),
            archive,
        })
    }

    pub fn from_config(cfg: &DatasetConfig) -> Result<Self, DiscoveryError> {
        Self::new(&cfg.container_id, &cfg.archive_prefix)
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn is_archive_href(&self, href: &str) -> bool {
        self.archive.is_match(href)
    }
}

/// Returns every matching `href` inside the container, in document order,
/// resolved against `base`. An empty result is not an error; a missing
/// container is.
pub fn extract_links(
    html: &str,
    base: &Url,
    pattern: &LinkPattern,
) -> Result<Vec<Link>, DiscoveryError> {
    let document = Html::parse_document(html);
    let container_css = format!("[id=\"{}\"]", pattern.container_id.replace('"', "\\\""));
    let container_selector = Selector::parse(&container_css)
        .map_err(|_| DiscoveryError::Selector(container_css.clone()))?;
    let anchor_selector =
        Selector::parse("a[href]").map_err(|_| DiscoveryError::Selector("a[href]".to_string()))?;

    let container = document
        .select(&container_selector)
        .next()
        .ok_or_else(|| DiscoveryError::ContainerNotFound(pattern.container_id.clone()))?;

    let mut links = Vec::new();
    for anchor in container.select(&anchor_selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !pattern.is_archive_href(href) {
            continue;
        }
        match Link::resolve(base, href) {
            Ok(link) => links.push(link),
            Err(e) => tracing::warn!(href, error = %e, "skipping unresolvable archive href"),
        }
    }
    Ok(links)
}
