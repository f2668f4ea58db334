//! Bounded-concurrency asset fetcher.
//!
//! Every plan entry becomes one task; a semaphore admits at most `concurrency`
//! of them at a time and each admitted task runs its blocking curl transfer on
//! tokio's blocking pool. Results are collected from the task set as they
//! finish, in no particular order. Failures are recorded per URL and never stop
//! other downloads.

mod claims;
mod control;
mod error;
mod head;
mod transfer;

pub use claims::{ClaimGuard, PathClaims};
pub use control::FetchControl;
pub use error::FetchError;

use crate::config::ModfetchConfig;
use crate::planner::DownloadPlan;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use transfer::Fetched;

/// Knobs for one fetch run.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Maximum simultaneous requests (values below 1 are treated as 1).
    pub concurrency: usize,
    /// Report every planned path as resolved without any I/O.
    pub dry_run: bool,
    pub connect_timeout: Duration,
    /// Abort when fewer than `low_speed_limit` bytes/s arrive for `low_speed_time`.
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
    /// Cap on one whole transfer.
    pub max_transfer_time: Duration,
    pub max_redirections: u32,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from_config(&ModfetchConfig::default())
    }
}

impl FetchOptions {
    pub fn from_config(cfg: &ModfetchConfig) -> Self {
        Self {
            concurrency: cfg.concurrency,
            dry_run: false,
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            low_speed_limit: cfg.low_speed_limit,
            low_speed_time: Duration::from_secs(cfg.low_speed_time_secs),
            max_transfer_time: Duration::from_secs(cfg.max_transfer_secs),
            max_redirections: cfg.max_redirections,
            user_agent: cfg.user_agent.clone(),
        }
    }
}

/// A URL that could not be fetched, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub url: String,
    pub reason: String,
}

/// Outcome of a fetch run.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    /// URL → final local path (extension possibly corrected).
    pub resolved: BTreeMap<String, PathBuf>,
    /// Failed URLs, sorted by URL.
    pub failures: Vec<FetchFailure>,
}

impl FetchReport {
    pub fn succeeded(&self) -> usize {
        self.resolved.len()
    }
}

/// Progress snapshot sent after each finished URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchProgress {
    /// URLs finished so far (success or failure).
    pub done: usize,
    pub failed: usize,
    pub total: usize,
}

/// Fetches every URL in `plan`, at most `opts.concurrency` at a time.
///
/// If `progress_tx` is `Some`, a [`FetchProgress`] is sent (best effort) after
/// each completion. If `control` is `Some` and gets cancelled, URLs not yet
/// started fail with [`FetchError::Cancelled`].
pub async fn fetch_all(
    plan: &DownloadPlan,
    opts: &FetchOptions,
    progress_tx: Option<&tokio::sync::mpsc::Sender<FetchProgress>>,
    control: Option<Arc<FetchControl>>,
) -> FetchReport {
    let total = plan.len();
    let semaphore = Arc::new(Semaphore::new(opts.concurrency.max(1)));
    let claims = Arc::new(PathClaims::default());
    let opts = Arc::new(opts.clone());

    let mut join_set = JoinSet::new();
    for (url, planned) in plan.iter() {
        let url = url.to_string();
        let planned = planned.to_path_buf();
        let semaphore = Arc::clone(&semaphore);
        let claims = Arc::clone(&claims);
        let opts = Arc::clone(&opts);
        let control = control.clone();
        join_set.spawn(async move {
            let result = fetch_one(url.clone(), planned, opts, claims, semaphore, control).await;
            (url, result)
        });
    }

    let pending = plan.iter().map(|(url, _)| url.to_string()).collect();
    let mut report = gather(join_set, pending, total, progress_tx).await;

    report.failures.sort_by(|a, b| a.url.cmp(&b.url));
    if !report.failures.is_empty() {
        tracing::error!("{} download(s) failed:", report.failures.len());
        for failure in &report.failures {
            tracing::error!("  {}  →  {}", failure.url, failure.reason);
        }
    }
    report
}

type TaskResult = (String, Result<PathBuf, FetchError>);

/// Drains the task set into a report. `pending` holds every submitted URL; the
/// ones whose task died without returning (panic, abort) are reported as failed.
async fn gather(
    mut join_set: JoinSet<TaskResult>,
    mut pending: BTreeSet<String>,
    total: usize,
    progress_tx: Option<&tokio::sync::mpsc::Sender<FetchProgress>>,
) -> FetchReport {
    let mut report = FetchReport::default();
    let mut done = 0usize;
    let mut lost = 0usize;
    while let Some(joined) = join_set.join_next().await {
        done += 1;
        match joined {
            Ok((url, result)) => {
                pending.remove(&url);
                match result {
                    Ok(path) => {
                        report.resolved.insert(url, path);
                    }
                    Err(e) => {
                        tracing::warn!("FAIL {}: {}", url, e);
                        report.failures.push(FetchFailure {
                            url,
                            reason: e.to_string(),
                        });
                    }
                }
            }
            Err(e) => {
                tracing::error!("fetch task join: {}", e);
                lost += 1;
            }
        }
        if let Some(tx) = progress_tx {
            let _ = tx.try_send(FetchProgress {
                done,
                failed: report.failures.len() + lost,
                total,
            });
        }
    }

    for url in pending {
        report.failures.push(FetchFailure {
            url,
            reason: FetchError::Join("task ended without a result".into()).to_string(),
        });
    }
    report
}

async fn fetch_one(
    url: String,
    planned: PathBuf,
    opts: Arc<FetchOptions>,
    claims: Arc<PathClaims>,
    semaphore: Arc<Semaphore>,
    control: Option<Arc<FetchControl>>,
) -> Result<PathBuf, FetchError> {
    if opts.dry_run {
        return Ok(planned);
    }

    let _permit = semaphore
        .acquire_owned()
        .await
        .map_err(|_| FetchError::Cancelled)?;
    if control.as_deref().is_some_and(FetchControl::is_cancelled) {
        return Err(FetchError::Cancelled);
    }

    let task_url = url.clone();
    let fetched = tokio::task::spawn_blocking(move || {
        transfer::fetch_to_path(&task_url, &planned, &opts, &claims)
    })
    .await
    .map_err(|e| FetchError::Join(e.to_string()))??;

    match fetched {
        Fetched::Written { path, bytes } => {
            tracing::debug!("OK {} → {} ({} B)", url, path.display(), bytes);
            Ok(path)
        }
        Fetched::Existing(path) => {
            tracing::debug!("skip (exists): {}", path.display());
            Ok(path)
        }
    }
}
