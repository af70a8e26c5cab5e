//! `cnpjdl links` – print the archive links without downloading anything.

use anyhow::{Context, Result};
use cnpjdl_core::config::DatasetConfig;
use cnpjdl_core::discovery;

pub async fn run_links(cfg: &DatasetConfig) -> Result<()> {
    let links = discovery::discover_links(cfg)
        .await
        .with_context(|| format!("discover archive links on {}", cfg.url))?;
    if links.is_empty() {
        eprintln!("No archive links found on {}", cfg.url);
    }
    for link in links {
        println!("{}", link);
    }
    Ok(())
}
