//! CLI for the cnpjdl archive downloader.

mod commands;
mod progress;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use cnpjdl_core::config::{self, DatasetConfig};
use std::path::PathBuf;

use commands::{run_completions, run_fetch, run_links};

/// Top-level CLI for the cnpjdl archive downloader.
#[derive(Debug, Parser)]
#[command(name = "cnpjdl")]
#[command(about = "Download the CNPJ open data archives published by the Receita Federal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Overrides for values read from `config.toml`.
#[derive(Debug, Default, Args)]
pub struct SourceArgs {
    /// Index page listing the archives.
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Discover the archive links and download every archive.
    Fetch {
        #[command(flatten)]
        source: SourceArgs,

        /// Directory the archives are written to.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Do not download archives whose destination file already exists.
        #[arg(long)]
        skip_existing: bool,

        /// Download up to N archives at once (0 = all at once).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
    },

    /// Print the archive links found on the index page, one per line.
    Links {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl CliCommand {
    /// Parses arguments, runs the command, and returns the process exit code.
    pub async fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Completions { shell } => {
                run_completions(shell);
                Ok(0)
            }
            CliCommand::Links { source } => {
                let cfg = apply_source(config::load_or_init()?, &source);
                tracing::debug!("loaded config: {:?}", cfg);
                run_links(&cfg).await?;
                Ok(0)
            }
            CliCommand::Fetch {
                source,
                output_dir,
                skip_existing,
                jobs,
            } => {
                let cfg = apply_source(config::load_or_init()?, &source);
                let cfg = apply_fetch_args(cfg, output_dir, skip_existing, jobs);
                tracing::debug!("loaded config: {:?}", cfg);
                run_fetch(cfg).await
            }
        }
    }
}

fn apply_source(mut cfg: DatasetConfig, source: &SourceArgs) -> DatasetConfig {
    if let Some(url) = &source.url {
        cfg.url = url.clone();
    }
    cfg
}

/// Layers `fetch` flags over the config file. `--jobs 0` lifts the limit.
fn apply_fetch_args(
    mut cfg: DatasetConfig,
    output_dir: Option<PathBuf>,
    skip_existing: bool,
    jobs: Option<usize>,
) -> DatasetConfig {
    if let Some(dir) = output_dir {
        cfg.output_dir = dir;
    }
    if skip_existing {
        cfg.skip_existing = true;
    }
    if let Some(n) = jobs {
        cfg.max_concurrent_downloads = (n > 0).then_some(n);
    }
    cfg
}

#[cfg(test)]
mod tests;
