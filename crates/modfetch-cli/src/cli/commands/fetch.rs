//! `modfetch fetch`: download a mod's assets and write the catalog.

use anyhow::{bail, Result};
use modfetch_core::config::ModfetchConfig;
use modfetch_core::fetcher::{FetchControl, FetchOptions, FetchProgress};
use modfetch_core::pipeline::{self, RunOptions};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

const PROGRESS_INTERVAL_MS: u64 = 500;

pub async fn run_fetch(
    cfg: &ModfetchConfig,
    mod_path: PathBuf,
    out: PathBuf,
    concurrency: Option<usize>,
    dry_run: bool,
) -> Result<()> {
    let mut fetch = FetchOptions::from_config(cfg);
    if let Some(n) = concurrency {
        fetch.concurrency = n;
    }
    fetch.dry_run = dry_run;
    let opts = RunOptions {
        mod_path,
        out_dir: out,
        catalog_file_name: cfg.catalog_file_name.clone(),
        fetch,
    };

    let control = Arc::new(FetchControl::new());
    let ctrl_c_control = Arc::clone(&control);
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, finishing in-flight downloads");
            ctrl_c_control.cancel();
        }
    });

    let (progress_tx, mut progress_rx) = tokio::sync::mpsc::channel::<FetchProgress>(64);
    let progress_handle = tokio::spawn(async move {
        let mut last_print = Instant::now();
        while let Some(p) = progress_rx.recv().await {
            let now = Instant::now();
            if now.duration_since(last_print).as_millis() as u64 >= PROGRESS_INTERVAL_MS
                || p.done >= p.total
            {
                eprint!("\r  {}/{} file(s), {} failed  ", p.done, p.total, p.failed);
                last_print = now;
            }
        }
        eprintln!();
    });

    let result = pipeline::run(&opts, Some(&progress_tx), Some(control)).await;
    drop(progress_tx);
    let _ = progress_handle.await;
    ctrl_c.abort();
    let summary = result?;

    println!("{}", summary.status_line());
    println!("Catalog: {}", summary.catalog_path.display());
    if summary.skipped_entities > 0 {
        tracing::info!("{} entities skipped", summary.skipped_entities);
    }

    if summary.failed() > 0 {
        bail!("{} download(s) failed", summary.failed());
    }
    Ok(())
}
