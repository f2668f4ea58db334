//! Asset file writes.
//!
//! Bodies are written to a `.part` sibling, synced, then renamed onto the final
//! path, so a crash or a failed write never leaves a truncated asset behind under
//! its real name.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `a.png` → `a.png.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Writes `data` to `final_path` atomically (temp file, fsync, rename).
/// The temp file is removed if any step fails.
pub fn write_atomic(final_path: &Path, data: &[u8]) -> io::Result<()> {
    let tp = temp_path(final_path);
    let result = write_and_rename(&tp, final_path, data);
    if result.is_err() {
        let _ = std::fs::remove_file(&tp);
    }
    result
}

fn write_and_rename(temp: &Path, final_path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::create(temp)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);
    std::fs::rename(temp, final_path)
}
