//! Run one assembly's tasks under a bounded worker pool.

use anyhow::{anyhow, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::catalog::{GroupKey, TaskGroup};
use crate::config::FetchConfig;
use crate::downloader::{self, DownloadOutcome, OutcomeKind};

/// What happened to one assembly: its outcomes (completion order) and how
/// long the whole group took.
#[derive(Debug)]
pub struct GroupReport {
    pub key: GroupKey,
    pub task_count: usize,
    pub elapsed: Duration,
    pub outcomes: Vec<DownloadOutcome>,
}

impl GroupReport {
    pub fn downloaded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.kind, OutcomeKind::Downloaded { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.kind, OutcomeKind::Skipped))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.kind, OutcomeKind::Failed { .. }))
            .count()
    }
}

/// Run every task in `group` with at most `cfg.max_workers` in flight.
///
/// All tasks are submitted immediately; a semaphore bounds how many fetch
/// in parallel. Outcomes are collected and printed in completion order,
/// which is not deterministic and carries no meaning beyond progress
/// output. One task failing never cancels its siblings, and the group is
/// never retried as a whole.
pub async fn run_group(group: TaskGroup, cfg: Arc<FetchConfig>) -> Result<GroupReport> {
    let key = group.key.clone();
    let task_count = group.tasks.len();
    let policy = cfg.retry_policy();
    let semaphore = Arc::new(Semaphore::new(cfg.max_workers.max(1)));
    let started = Instant::now();

    let mut join_set = JoinSet::new();
    for task in group.tasks {
        let cfg = Arc::clone(&cfg);
        let semaphore = Arc::clone(&semaphore);
        join_set.spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let outcome =
                tokio::task::spawn_blocking(move || downloader::download_task(&task, &cfg, &policy))
                    .await?;
            anyhow::Ok(outcome)
        });
    }

    let mut outcomes = Vec::with_capacity(task_count);
    while let Some(joined) = join_set.join_next().await {
        let outcome = joined
            .map_err(|e| anyhow!("worker task join: {}", e))?
            .map_err(|e| anyhow!("worker pool: {}", e))?;
        println!("{}", outcome);
        outcomes.push(outcome);
    }

    let elapsed = started.elapsed();
    tracing::info!(
        assembly = %key,
        booths = task_count,
        elapsed_secs = elapsed.as_secs_f64(),
        "assembly completed"
    );

    Ok(GroupReport {
        key,
        task_count,
        elapsed,
        outcomes,
    })
}
