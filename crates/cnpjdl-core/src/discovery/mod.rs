//! Link discovery: fetch the index page and pick out the archive links.
//!
//! The GET is a plain blocking libcurl transfer; async callers go through
//! [`discover_links`], which runs it on the blocking pool.

mod error;
mod parse;

pub use error::DiscoveryError;
pub use parse::{extract_links, LinkPattern};

use std::time::Duration;
use url::Url;

use crate::config::DatasetConfig;
use crate::url_model::Link;

/// Fetches the index page body. Follows redirects; non-2xx is an error.
/// No retries. Runs in the current thread.
pub fn fetch_index(url: &str) -> Result<String, DiscoveryError> {
    let curl_err = |source: curl::Error| DiscoveryError::Curl {
        url: url.to_string(),
        source,
    };
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(curl_err)?;
    easy.follow_location(true).map_err(curl_err)?;
    easy.max_redirections(10).map_err(curl_err)?;
    easy.connect_timeout(Duration::from_secs(30)).map_err(curl_err)?;
    easy.timeout(Duration::from_secs(120)).map_err(curl_err)?;

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(curl_err)?;
        transfer.perform().map_err(curl_err)?;
    }

    let code = easy.response_code().map_err(curl_err)?;
    if !(200..300).contains(&code) {
        return Err(DiscoveryError::Http {
            url: url.to_string(),
            code,
        });
    }

    tracing::debug!(url, bytes = body.len(), "fetched index page");
    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Fetches and scans the configured index page (blocking).
pub fn discover_links_blocking(cfg: &DatasetConfig) -> Result<Vec<Link>, DiscoveryError> {
    let base = Url::parse(&cfg.url).map_err(|source| DiscoveryError::InvalidUrl {
        url: cfg.url.clone(),
        source,
    })?;
    let pattern = LinkPattern::from_config(cfg)?;
    let html = fetch_index(base.as_str())?;
    let links = extract_links(&html, &base, &pattern)?;
    tracing::info!(url = %base, count = links.len(), "discovered archive links");
    Ok(links)
}

/// Async entry point for discovery: runs [`discover_links_blocking`] on the blocking pool.
pub async fn discover_links(cfg: &DatasetConfig) -> Result<Vec<Link>, DiscoveryError> {
    let cfg = cfg.clone();
    tokio::task::spawn_blocking(move || discover_links_blocking(&cfg)).await?
}
