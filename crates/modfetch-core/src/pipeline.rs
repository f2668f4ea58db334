//! One end-to-end run: load → collect → plan → fetch → catalog.
//!
//! Collection, planning and catalog assembly run synchronously; only the fetch
//! phase is concurrent. Fatal errors (unreadable mod, unwritable output) are
//! returned; per-entity and per-URL problems end up in the [`RunSummary`].

use crate::catalog::{self, Catalog};
use crate::collector;
use crate::fetcher::{self, FetchControl, FetchFailure, FetchOptions, FetchProgress};
use crate::mod_file;
use crate::planner;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Inputs of one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub mod_path: PathBuf,
    pub out_dir: PathBuf,
    pub catalog_file_name: String,
    pub fetch: FetchOptions,
}

impl RunOptions {
    pub fn catalog_path(&self) -> PathBuf {
        self.out_dir.join(&self.catalog_file_name)
    }
}

/// What a run did.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub sheets: usize,
    pub cards: usize,
    pub images: usize,
    pub skipped_entities: usize,
    /// Distinct URLs in the plan.
    pub planned: usize,
    /// URLs resolved to a local file (or planned path in dry run).
    pub succeeded: usize,
    pub failures: Vec<FetchFailure>,
    pub dry_run: bool,
    pub catalog_path: PathBuf,
    pub catalog: Catalog,
}

impl RunSummary {
    /// Planned URLs without a resolved path.
    pub fn failed(&self) -> usize {
        self.planned.saturating_sub(self.succeeded)
    }

    /// Human-readable one-line result.
    pub fn status_line(&self) -> String {
        let verb = if self.dry_run { "planned" } else { "downloaded" };
        let mut line = format!(
            "Done: {}/{} file(s) {}",
            self.succeeded, self.planned, verb
        );
        if self.failed() > 0 {
            line.push_str(&format!(", {} failed", self.failed()));
        }
        line
    }
}

/// Runs the whole pipeline for `opts`.
pub async fn run(
    opts: &RunOptions,
    progress_tx: Option<&tokio::sync::mpsc::Sender<FetchProgress>>,
    control: Option<Arc<FetchControl>>,
) -> Result<RunSummary> {
    tracing::info!("loading {}", opts.mod_path.display());
    let doc = mod_file::load_mod(&opts.mod_path)?;

    let collection = collector::collect_mod(&doc);
    let cards = collection.sheets.card_count();
    tracing::info!(
        "found {} sprite sheet(s) covering {} card(s), {} custom image object(s)",
        collection.sheets.len(),
        cards,
        collection.images.len()
    );

    let plan = planner::plan(&collection.sheets, &collection.images, &opts.out_dir);
    tracing::info!("{} distinct URL(s) to download", plan.len());

    if opts.fetch.dry_run {
        tracing::info!("dry run: skipping downloads");
    } else {
        create_out_dir(&opts.out_dir)?;
    }
    let report = fetcher::fetch_all(&plan, &opts.fetch, progress_tx, control).await;

    let catalog = catalog::build_from_collection(&collection, &report.resolved);
    create_out_dir(&opts.out_dir)?;
    let catalog_path = opts.catalog_path();
    catalog::write_catalog(&catalog_path, &catalog)?;
    tracing::info!("catalog written → {}", catalog_path.display());

    Ok(RunSummary {
        sheets: collection.sheets.len(),
        cards,
        images: collection.images.len(),
        skipped_entities: collection.skipped,
        planned: plan.len(),
        succeeded: report.succeeded(),
        failures: report.failures,
        dry_run: opts.fetch.dry_run,
        catalog_path,
        catalog,
    })
}

fn create_out_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))
}
