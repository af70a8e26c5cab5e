//! Tests for fetch, links, completions.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

#[test]
fn cli_parse_fetch_defaults() {
    match parse(&["cnpjdl", "fetch"]) {
        CliCommand::Fetch {
            source,
            output_dir,
            skip_existing,
            jobs,
        } => {
            assert!(source.url.is_none());
            assert!(output_dir.is_none());
            assert!(!skip_existing);
            assert!(jobs.is_none());
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_all_flags() {
    match parse(&[
        "cnpjdl",
        "fetch",
        "--url",
        "http://localhost:8000/index.html",
        "--output-dir",
        "/data/cnpj",
        "--skip-existing",
        "--jobs",
        "2",
    ]) {
        CliCommand::Fetch {
            source,
            output_dir,
            skip_existing,
            jobs,
        } => {
            assert_eq!(source.url.as_deref(), Some("http://localhost:8000/index.html"));
            assert_eq!(output_dir, Some(PathBuf::from("/data/cnpj")));
            assert!(skip_existing);
            assert_eq!(jobs, Some(2));
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_rejects_negative_jobs() {
    assert!(Cli::try_parse_from(["cnpjdl", "fetch", "--jobs", "-1"]).is_err());
}

#[test]
fn cli_parse_links() {
    match parse(&["cnpjdl", "links"]) {
        CliCommand::Links { source } => assert!(source.url.is_none()),
        _ => panic!("expected Links"),
    }
}

#[test]
fn cli_parse_links_url() {
    match parse(&["cnpjdl", "links", "--url", "http://example.com/"]) {
        CliCommand::Links { source } => {
            assert_eq!(source.url.as_deref(), Some("http://example.com/"))
        }
        _ => panic!("expected Links"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["cnpjdl", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_parse_requires_subcommand() {
    assert!(Cli::try_parse_from(["cnpjdl"]).is_err());
}

#[test]
fn cli_parse_rejects_unknown_shell() {
    assert!(Cli::try_parse_from(["cnpjdl", "completions", "cmd"]).is_err());
}
