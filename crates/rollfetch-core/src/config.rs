use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::retry::RetryPolicy;

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

/// Global configuration loaded from `~/.config/rollfetch/config.toml`.
///
/// All knobs are explicit values passed down to the scheduler and workers;
/// there are no ambient module-level defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Number of concurrent download workers per assembly group.
    pub max_workers: usize,
    /// Maximum fetch attempts per booth (including the first).
    pub max_retries: u32,
    /// Per-attempt HTTP timeout in seconds (connect + transfer).
    pub request_timeout_secs: u64,
    /// Fixed sleep between failed attempts, in seconds (e.g. 0.5 = 500ms).
    pub retry_backoff_secs: f64,
    /// Root directory for downloaded PDFs; one subdirectory per assembly.
    pub output_dir: PathBuf,
    /// User-Agent sent with every request. The roll server rejects
    /// header-less clients, so this must look like a browser.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_workers: 5,
            max_retries: 3,
            request_timeout_secs: 20,
            retry_backoff_secs: 1.0,
            output_dir: PathBuf::from("pdfs"),
            user_agent: default_user_agent(),
        }
    }
}

impl FetchConfig {
    /// Per-attempt HTTP timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Retry policy derived from the configured ceiling and backoff.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_retries.max(1),
            backoff: Duration::from_secs_f64(self.retry_backoff_secs.max(0.0)),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rollfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}
