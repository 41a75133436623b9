//! CLI for the rollfetch booth PDF downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rollfetch_core::config;
use std::path::PathBuf;

use commands::{run_download, run_inspect, DownloadOverrides};

/// Top-level CLI for the rollfetch downloader.
#[derive(Debug, Parser)]
#[command(name = "rollfetch")]
#[command(about = "rollfetch: bulk downloader for polling-booth electoral roll PDFs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every booth PDF listed in a catalog CSV.
    Run {
        /// Path to the catalog CSV (AC No, AC Name, Booth No, URL columns).
        catalog: PathBuf,

        /// Root directory for downloaded PDFs (overrides config).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Concurrent workers per assembly (overrides config).
        #[arg(long, value_name = "N")]
        workers: Option<usize>,

        /// Fetch attempts per booth, including the first (overrides config).
        #[arg(long, value_name = "N")]
        retries: Option<u32>,

        /// Per-attempt HTTP timeout in seconds (overrides config).
        #[arg(long, value_name = "SECS")]
        timeout_secs: Option<u64>,

        /// Sleep between failed attempts, in seconds (overrides config).
        #[arg(long, value_name = "SECS")]
        backoff_secs: Option<f64>,
    },

    /// Validate a catalog CSV and show per-assembly booth counts without downloading.
    Inspect {
        /// Path to the catalog CSV.
        catalog: PathBuf,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                catalog,
                output_dir,
                workers,
                retries,
                timeout_secs,
                backoff_secs,
            } => {
                let overrides = DownloadOverrides {
                    output_dir,
                    workers,
                    retries,
                    timeout_secs,
                    backoff_secs,
                };
                run_download(&catalog, cfg, overrides).await?;
            }
            CliCommand::Inspect { catalog } => run_inspect(&catalog)?,
        }

        Ok(())
    }
}
