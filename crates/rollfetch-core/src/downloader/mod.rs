//! Download worker: one booth, fetch-and-store with bounded retries.
//!
//! The worker owns the whole failure surface of a task. Every outcome,
//! including exhaustion of the retry budget and disk errors, is returned as
//! a `DownloadOutcome`; nothing propagates to the scheduler as an error.

mod attempt;

pub use attempt::fetch_once;

use std::fmt;
use std::time::{Duration, Instant};

use crate::catalog::DownloadTask;
use crate::config::FetchConfig;
use crate::retry::{self, FetchError, RetryDecision, RetryPolicy};
use crate::storage;

/// Terminal state of one task.
#[derive(Debug)]
pub enum OutcomeKind {
    /// Destination file already existed; nothing was fetched.
    Skipped,
    /// Fetched and stored; `elapsed` is the successful attempt's wall time.
    Downloaded { elapsed: Duration },
    /// All attempts failed (or a storage error ended the task early).
    Failed { attempts: u32, error: FetchError },
}

/// Result of one worker invocation, tagged with the booth it belongs to.
#[derive(Debug)]
pub struct DownloadOutcome {
    pub booth_no: String,
    pub kind: OutcomeKind,
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self.kind,
            OutcomeKind::Skipped | OutcomeKind::Downloaded { .. }
        )
    }
}

impl fmt::Display for DownloadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            OutcomeKind::Skipped => {
                write!(f, "Skipped {}.pdf (already exists)", self.booth_no)
            }
            OutcomeKind::Downloaded { elapsed } => {
                write!(
                    f,
                    "Downloaded {}.pdf ({:.2}s)",
                    self.booth_no,
                    elapsed.as_secs_f64()
                )
            }
            OutcomeKind::Failed { attempts, error } => {
                write!(
                    f,
                    "Failed {}.pdf after {} retries: {}",
                    self.booth_no, attempts, error
                )
            }
        }
    }
}

/// Fetch one booth's PDF and store it at the task's destination path.
///
/// Skips immediately if the destination already exists (this is the whole
/// resume mechanism: re-running a catalog only touches what is missing).
/// Otherwise attempts sequential fetches under `policy`, sleeping the fixed
/// backoff between failures. Blocking; run it on a worker thread.
pub fn download_task(
    task: &DownloadTask,
    cfg: &FetchConfig,
    policy: &RetryPolicy,
) -> DownloadOutcome {
    let dest = task.destination_path(&cfg.output_dir);
    if dest.exists() {
        return DownloadOutcome {
            booth_no: task.booth_no.clone(),
            kind: OutcomeKind::Skipped,
        };
    }

    let mut attempt = 1u32;
    loop {
        let started = Instant::now();
        let error = match fetch_once(&task.url, cfg) {
            Ok(body) => match storage::write_atomic(&dest, &body) {
                Ok(()) => {
                    return DownloadOutcome {
                        booth_no: task.booth_no.clone(),
                        kind: OutcomeKind::Downloaded {
                            elapsed: started.elapsed(),
                        },
                    };
                }
                Err(e) => FetchError::Storage(e),
            },
            Err(e) => e,
        };

        tracing::warn!(
            assembly = %task.group,
            booth = %task.booth_no,
            attempt,
            "fetch failed: {}",
            error
        );

        if !retry::is_retryable(&error) {
            return DownloadOutcome {
                booth_no: task.booth_no.clone(),
                kind: OutcomeKind::Failed {
                    attempts: attempt,
                    error,
                },
            };
        }
        match policy.decide(attempt) {
            RetryDecision::NoRetry => {
                return DownloadOutcome {
                    booth_no: task.booth_no.clone(),
                    kind: OutcomeKind::Failed {
                        attempts: attempt,
                        error,
                    },
                };
            }
            RetryDecision::RetryAfter(delay) => {
                std::thread::sleep(delay);
                attempt += 1;
            }
        }
    }
}
