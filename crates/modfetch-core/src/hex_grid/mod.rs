//! Hex grid extraction from a VASSAL module (`.vmod`, a zip carrying `buildFile.xml`).
//!
//! Every game board (name of the form `CODE: Description`) with at least one region
//! becomes a `board_CODE` entry listing the region centers scaled to asset pixels.

mod board_key;
mod build_file;

pub use board_key::derive_board_key;
pub use build_file::parse_build_file;

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Archive entry names tried in order; older modules omit the extension.
const BUILD_FILE_NAMES: &[&str] = &["buildFile.xml", "buildFile"];

#[derive(Debug, thiserror::Error)]
pub enum HexGridError {
    #[error("malformed build file: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("malformed attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),
    #[error("not a VASSAL module: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("module has no buildFile.xml")]
    MissingBuildFile,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hex {
    pub id: String,
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    pub name: String,
    pub image: String,
    pub hexes: Vec<Hex>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HexGrid {
    pub scale_factor: f64,
    pub source: String,
    pub boards: BTreeMap<String, Board>,
}

impl HexGrid {
    pub fn hex_count(&self) -> usize {
        self.boards.values().map(|b| b.hexes.len()).sum()
    }
}

fn read_build_file<R: Read + std::io::Seek>(
    archive: &mut zip::ZipArchive<R>,
) -> Result<(String, Vec<u8>)> {
    for name in BUILD_FILE_NAMES {
        match archive.by_name(name) {
            Ok(mut entry) => {
                let mut data = Vec::new();
                entry
                    .read_to_end(&mut data)
                    .with_context(|| format!("failed to read {} from module", name))?;
                return Ok((name.to_string(), data));
            }
            Err(zip::result::ZipError::FileNotFound) => continue,
            Err(e) => return Err(HexGridError::Zip(e).into()),
        }
    }
    Err(HexGridError::MissingBuildFile.into())
}

/// Reads the board layout out of a `.vmod` archive.
pub fn parse_vmod(path: &Path, scale: f64) -> Result<HexGrid> {
    let file = File::open(path)
        .with_context(|| format!("failed to open module {}", path.display()))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(HexGridError::from)
        .with_context(|| format!("failed to open module {}", path.display()))?;
    let (entry_name, xml) = read_build_file(&mut archive)
        .with_context(|| format!("failed to read module {}", path.display()))?;

    let boards = parse_build_file(&xml, scale)
        .with_context(|| format!("failed to parse {} in {}", entry_name, path.display()))?;
    let module_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(HexGrid {
        scale_factor: scale,
        source: format!("{}/{}", module_name, entry_name),
        boards,
    })
}

/// Writes the grid as pretty JSON, creating parent directories as needed.
pub fn write_hex_grid(path: &Path, grid: &HexGrid) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(grid)?;
    std::fs::write(path, json + "\n")
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
