//! Catalog assembly: sheets and images joined back to their local files.
//!
//! Pure: built from the collector output and the URL → path map once every
//! fetch has finished. Unresolved assets become `null`; an image's `back_file`
//! key exists only when the image declared a secondary URL.

use crate::collector::{CardSlice, Collection, CustomImageRecord, SheetSet};
use crate::url_model::stem;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pub sprite_sheets: Vec<SheetEntry>,
    pub images: Vec<ImageEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetEntry {
    pub id: String,
    pub face_file: Option<String>,
    pub back_file: Option<String>,
    pub num_width: u32,
    pub num_height: u32,
    pub unique_back: bool,
    pub cards: Vec<CardEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardEntry {
    pub guid: String,
    pub nickname: String,
    pub card_id: u64,
    pub sheet_index: u32,
    pub row: u32,
    pub col: u32,
}

impl From<&CardSlice> for CardEntry {
    fn from(slice: &CardSlice) -> Self {
        Self {
            guid: slice.guid.clone(),
            nickname: slice.nickname.clone(),
            card_id: slice.card_id,
            sheet_index: slice.sheet_index,
            row: slice.row,
            col: slice.col,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageEntry {
    pub guid: String,
    pub nickname: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub face_file: Option<String>,
    /// Outer `None`: no secondary image declared (key omitted).
    /// `Some(None)`: declared but unresolved (`null`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_file: Option<Option<String>>,
}

fn lookup(resolved: &BTreeMap<String, PathBuf>, url: &str) -> Option<String> {
    resolved
        .get(url)
        .map(|path| path.to_string_lossy().into_owned())
}

/// Builds the catalog from collected entities and the URL → final path map.
pub fn build(
    sheets: &SheetSet,
    images: &[CustomImageRecord],
    resolved: &BTreeMap<String, PathBuf>,
) -> Catalog {
    let sprite_sheets = sheets
        .iter()
        .map(|sheet| SheetEntry {
            id: stem(&sheet.key.face_url),
            face_file: lookup(resolved, &sheet.key.face_url),
            back_file: if sheet.key.back_url.is_empty() {
                None
            } else {
                lookup(resolved, &sheet.key.back_url)
            },
            num_width: sheet.layout.num_width,
            num_height: sheet.layout.num_height,
            unique_back: sheet.layout.unique_back,
            cards: sheet.cards.iter().map(CardEntry::from).collect(),
        })
        .collect();

    let images = images
        .iter()
        .map(|image| ImageEntry {
            guid: image.guid.clone(),
            nickname: image.nickname.clone(),
            kind: image.kind.clone(),
            face_file: lookup(resolved, &image.image_url),
            back_file: image
                .secondary_url
                .as_deref()
                .map(|url| lookup(resolved, url)),
        })
        .collect();

    Catalog {
        sprite_sheets,
        images,
    }
}

/// Catalog for a whole collection.
pub fn build_from_collection(
    collection: &Collection,
    resolved: &BTreeMap<String, PathBuf>,
) -> Catalog {
    build(&collection.sheets, &collection.images, resolved)
}

/// Writes the catalog as pretty-printed JSON.
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<()> {
    let json = serde_json::to_string_pretty(catalog).context("failed to serialize catalog")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write catalog {}", path.display()))?;
    Ok(())
}
