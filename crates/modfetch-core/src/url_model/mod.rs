//! URL normalization and file-name derivation.
//!
//! Strips TTS annotation markers from raw URLs, derives short stems and file
//! extensions from URL paths or declared content types, and turns nicknames
//! into safe file-name fragments.

mod annotation;
mod content_type;
mod path;
mod sanitize;

pub use annotation::clean;
pub use content_type::extension_from_content_type;
pub use path::{guess_extension, stem};
pub use sanitize::sanitize_name;

/// Extension used when neither the URL nor the content type says anything usable.
pub const DEFAULT_EXTENSION: &str = ".jpg";

/// Image extensions recognized on URL paths (lowercase, with leading dot).
const KNOWN_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Replaces the extension of `path` with `ext` (given with its leading dot).
///
/// `assets/abc_face.jpg` with `.png` → `assets/abc_face.png`.
pub fn with_extension(path: &std::path::Path, ext: &str) -> std::path::PathBuf {
    path.with_extension(ext.trim_start_matches('.'))
}

/// Extension of `path` as `.ext`, lowercased; empty when the path has none.
pub fn extension_of(path: &std::path::Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default()
}
