//! Tabletop Simulator mod document: loading and node model.
//!
//! The document is a tree of `ObjectStates`. Loading is strict at the top level
//! (missing file, invalid JSON, wrong root shape) and lenient below it: a node
//! that is not an object is kept as [`Node::Malformed`] so the walk can skip it
//! without losing its siblings, and a mistyped field inside an object falls back
//! to its default.

mod lenient;
mod parse;

pub(crate) use lenient::preview;

pub use parse::{CustomImage, DeckDefinition, DeckMap, ModFile, Node, ObjectState};

use anyhow::{Context, Result};
use std::path::Path;

/// Reads and parses a mod document from `path`.
pub fn load_mod(path: &Path) -> Result<ModFile> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read mod file {}", path.display()))?;
    parse_mod(&data).with_context(|| format!("failed to parse mod file {}", path.display()))
}

/// Parses a mod document from JSON text.
pub fn parse_mod(json: &str) -> Result<ModFile> {
    let doc: ModFile = serde_json::from_str(json).context("invalid mod JSON")?;
    Ok(doc)
}
