//! `rollfetch run <catalog>` – download every booth PDF in the catalog.

use anyhow::{Context, Result};
use rollfetch_core::catalog::load_catalog;
use rollfetch_core::config::FetchConfig;
use rollfetch_core::scheduler::run_catalog;
use std::path::{Path, PathBuf};

/// Per-invocation flag overrides applied on top of the config file.
#[derive(Debug, Default)]
pub struct DownloadOverrides {
    pub output_dir: Option<PathBuf>,
    pub workers: Option<usize>,
    pub retries: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub backoff_secs: Option<f64>,
}

impl DownloadOverrides {
    fn apply(self, cfg: &mut FetchConfig) {
        if let Some(dir) = self.output_dir {
            cfg.output_dir = dir;
        }
        if let Some(n) = self.workers {
            cfg.max_workers = n;
        }
        if let Some(n) = self.retries {
            cfg.max_retries = n;
        }
        if let Some(secs) = self.timeout_secs {
            cfg.request_timeout_secs = secs;
        }
        if let Some(secs) = self.backoff_secs {
            cfg.retry_backoff_secs = secs;
        }
    }
}

pub async fn run_download(
    catalog_path: &Path,
    mut cfg: FetchConfig,
    overrides: DownloadOverrides,
) -> Result<()> {
    overrides.apply(&mut cfg);

    let catalog = load_catalog(catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;
    tracing::info!(
        tasks = catalog.len(),
        output_dir = %cfg.output_dir.display(),
        "starting run"
    );

    let summary = run_catalog(catalog, cfg).await?;

    println!(
        "Run complete: {} assemblies, {} booths in {:.2}s",
        summary.groups,
        summary.tasks,
        summary.elapsed.as_secs_f64()
    );
    println!(
        "  downloaded {}, skipped {}, failed {}",
        summary.downloaded, summary.skipped, summary.failed
    );
    if !summary.failures.is_empty() {
        println!("Failures (re-run to retry just these):");
        for f in &summary.failures {
            println!("  {} / {}.pdf: {}", f.assembly, f.booth_no, f.error);
        }
    }
    Ok(())
}
