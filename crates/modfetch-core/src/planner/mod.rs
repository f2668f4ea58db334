//! Download planning: one local path per distinct URL.
//!
//! Pure: no network and no filesystem checks. The first allocation of a URL
//! wins, so a URL shared by several sheets or images is downloaded once.

use crate::collector::{CustomImageRecord, SheetSet};
use crate::url_model::{guess_extension, sanitize_name, stem};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Deduplicated URL → planned target path mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadPlan {
    entries: BTreeMap<String, PathBuf>,
}

impl DownloadPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `path()` to `url` unless the URL is already planned.
    /// Returns the path the URL maps to either way.
    pub fn allocate_with<F>(&mut self, url: &str, path: F) -> &Path
    where
        F: FnOnce() -> PathBuf,
    {
        self.entries.entry(url.to_string()).or_insert_with(path).as_path()
    }

    pub fn get(&self, url: &str) -> Option<&Path> {
        self.entries.get(url).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries.iter().map(|(u, p)| (u.as_str(), p.as_path()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the download plan for all sheets and custom images under `out_dir`.
pub fn plan(sheets: &SheetSet, images: &[CustomImageRecord], out_dir: &Path) -> DownloadPlan {
    let mut plan = DownloadPlan::new();

    for sheet in sheets.iter() {
        let face_url = &sheet.key.face_url;
        let back_url = &sheet.key.back_url;

        plan.allocate_with(face_url, || {
            out_dir.join(format!("{}_face{}", stem(face_url), guess_extension(face_url)))
        });

        // back == face resolves to the face entry: same URL, same file.
        if !back_url.is_empty() {
            plan.allocate_with(back_url, || {
                out_dir.join(format!("{}_back{}", stem(back_url), guess_extension(back_url)))
            });
        }
    }

    for image in images {
        let base = format!("{}_{}", image.guid, sanitize_name(&image.nickname));
        let suffix = if image.secondary_url.is_some() { "_face" } else { "" };

        plan.allocate_with(&image.image_url, || {
            out_dir.join(format!("{}{}{}", base, suffix, guess_extension(&image.image_url)))
        });

        if let Some(secondary) = &image.secondary_url {
            plan.allocate_with(secondary, || {
                out_dir.join(format!("{}_back{}", base, guess_extension(secondary)))
            });
        }
    }

    plan
}
