//! Tests for layering CLI flags over the config file.

use crate::cli::{apply_fetch_args, apply_source, SourceArgs};
use cnpjdl_core::config::DatasetConfig;
use std::path::PathBuf;

#[test]
fn source_url_overrides_config() {
    let source = SourceArgs {
        url: Some("http://localhost/index.html".to_string()),
    };
    let cfg = apply_source(DatasetConfig::default(), &source);
    assert_eq!(cfg.url, "http://localhost/index.html");
}

#[test]
fn absent_source_keeps_config() {
    let cfg = apply_source(DatasetConfig::default(), &SourceArgs::default());
    assert_eq!(cfg.url, DatasetConfig::default().url);
}

#[test]
fn fetch_args_override_config() {
    let cfg = apply_fetch_args(
        DatasetConfig::default(),
        Some(PathBuf::from("/srv/cnpj")),
        true,
        Some(8),
    );
    assert_eq!(cfg.output_dir, PathBuf::from("/srv/cnpj"));
    assert!(cfg.skip_existing);
    assert_eq!(cfg.max_concurrent_downloads, Some(8));
}

#[test]
fn fetch_args_absent_keep_config() {
    let base = DatasetConfig {
        skip_existing: true,
        max_concurrent_downloads: Some(2),
        ..DatasetConfig::default()
    };
    let cfg = apply_fetch_args(base.clone(), None, false, None);
    assert_eq!(cfg, base);
}

#[test]
fn zero_jobs_lifts_the_limit() {
    let cfg = apply_fetch_args(DatasetConfig::default(), None, false, Some(0));
    assert_eq!(cfg.max_concurrent_downloads, None);
}
