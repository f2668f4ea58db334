//! CLI for modfetch.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use modfetch_core::config;
use std::path::PathBuf;

use commands::{run_fetch, run_hex_grid};

/// Top-level CLI for modfetch.
#[derive(Debug, Parser)]
#[command(name = "modfetch")]
#[command(
    about = "modfetch: download and catalog the image assets of a Tabletop Simulator mod",
    long_about = None
)]
pub struct Cli {
    /// Debug-level logging (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log to $XDG_STATE_HOME/modfetch/modfetch.log instead of stderr.
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every sprite sheet and custom image of a mod and write the catalog.
    Fetch {
        /// Path to the saved mod JSON.
        #[arg(long = "mod", default_value = "tts_mod.json", value_name = "PATH")]
        mod_path: PathBuf,
        /// Output directory for assets and the catalog.
        #[arg(long, default_value = "assets", value_name = "DIR")]
        out: PathBuf,
        /// Simultaneous downloads (default from config).
        #[arg(long, value_name = "N")]
        concurrency: Option<usize>,
        /// Plan and write the catalog without downloading anything.
        #[arg(long)]
        dry_run: bool,
    },

    /// Extract board hex centers from a VASSAL module.
    HexGrid {
        /// Path to the .vmod file.
        #[arg(
            long,
            default_value = "assets/vassal_v2/Gunslinger_v2.0.vmod",
            value_name = "PATH"
        )]
        vmod: PathBuf,
        /// Output JSON path.
        #[arg(long, default_value = "assets/hex_grid.json", value_name = "PATH")]
        out: PathBuf,
        /// Scale from module pixels to asset pixels (default from config).
        #[arg(long, value_name = "FACTOR")]
        scale: Option<f64>,
        /// Print stats without writing the output file.
        #[arg(long)]
        dry_run: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match self.command {
            CliCommand::Fetch {
                mod_path,
                out,
                concurrency,
                dry_run,
            } => run_fetch(&cfg, mod_path, out, concurrency, dry_run).await?,
            CliCommand::HexGrid {
                vmod,
                out,
                scale,
                dry_run,
            } => run_hex_grid(&cfg, &vmod, &out, scale, dry_run)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
