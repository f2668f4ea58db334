//! `modfetch hex-grid`: VASSAL module → hex_grid.json.

use anyhow::{Context, Result};
use modfetch_core::config::ModfetchConfig;
use modfetch_core::hex_grid;
use std::path::Path;

pub fn run_hex_grid(
    cfg: &ModfetchConfig,
    vmod: &Path,
    out: &Path,
    scale: Option<f64>,
    dry_run: bool,
) -> Result<()> {
    let scale = scale.unwrap_or_else(|| cfg.hex_scale_factor());
    tracing::info!("parsing {} (scale {})", vmod.display(), scale);
    let grid = hex_grid::parse_vmod(vmod, scale)
        .with_context(|| format!("failed to extract hex grid from {}", vmod.display()))?;

    for (key, board) in &grid.boards {
        tracing::info!("{}: {} hexes ({})", key, board.hexes.len(), board.name);
    }
    tracing::info!("{} boards, {} hexes total", grid.boards.len(), grid.hex_count());

    if dry_run {
        println!("Dry run: {} boards, {} hexes", grid.boards.len(), grid.hex_count());
        return Ok(());
    }
    hex_grid::write_hex_grid(out, &grid)?;
    println!("Wrote {}", out.display());
    Ok(())
}
