//! Orchestrator: iterate assemblies sequentially and aggregate the run.

use anyhow::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::catalog::{group_catalog, DownloadTask};
use crate::config::FetchConfig;
use crate::downloader::OutcomeKind;

use super::group::run_group;

/// One failed task, kept so the run can end with an explicit failure list
/// instead of making the reader tally log lines.
#[derive(Debug)]
pub struct FailureRecord {
    pub assembly: String,
    pub booth_no: String,
    pub error: String,
}

/// Aggregate statistics for a whole run.
#[derive(Debug)]
pub struct RunSummary {
    pub groups: usize,
    pub tasks: usize,
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub elapsed: Duration,
    pub failures: Vec<FailureRecord>,
}

/// Run the full catalog: group by assembly, process groups one at a time in
/// key order, tasks within a group concurrently.
///
/// There is no global abort: every group and every task is always processed,
/// and per-task failures only show up in the summary. Re-running the same
/// catalog is the remediation for failures; completed booths are skipped.
pub async fn run_catalog(catalog: Vec<DownloadTask>, cfg: FetchConfig) -> Result<RunSummary> {
    let groups = group_catalog(catalog);
    let total_groups = groups.len();
    println!("Total assemblies: {}\n", total_groups);

    let cfg = Arc::new(cfg);
    let started = Instant::now();
    let mut summary = RunSummary {
        groups: total_groups,
        tasks: 0,
        downloaded: 0,
        skipped: 0,
        failed: 0,
        elapsed: Duration::ZERO,
        failures: Vec::new(),
    };

    for (i, group) in groups.into_iter().enumerate() {
        println!(
            "=== Assembly {}/{}: {} ({} booths) ===",
            i + 1,
            total_groups,
            group.key,
            group.tasks.len()
        );
        let report = run_group(group, Arc::clone(&cfg)).await?;
        println!(
            "Assembly {} completed in {:.2}s\n",
            report.key,
            report.elapsed.as_secs_f64()
        );

        summary.tasks += report.task_count;
        summary.downloaded += report.downloaded();
        summary.skipped += report.skipped();
        summary.failed += report.failed();
        for outcome in &report.outcomes {
            if let OutcomeKind::Failed { error, .. } = &outcome.kind {
                summary.failures.push(FailureRecord {
                    assembly: report.key.to_string(),
                    booth_no: outcome.booth_no.clone(),
                    error: error.to_string(),
                });
            }
        }
    }

    summary.elapsed = started.elapsed();
    tracing::info!(
        groups = summary.groups,
        tasks = summary.tasks,
        downloaded = summary.downloaded,
        skipped = summary.skipped,
        failed = summary.failed,
        "run completed"
    );
    Ok(summary)
}
