//! Stem and extension extraction from URL paths.

use super::{DEFAULT_EXTENSION, KNOWN_EXTENSIONS};
use std::path::Path;

/// Splits a URL into (host, path). Unparseable input is treated as a bare path.
fn host_and_path(url: &str) -> (String, String) {
    match url::Url::parse(url) {
        Ok(parsed) => (
            parsed.host_str().unwrap_or_default().to_string(),
            parsed.path().to_string(),
        ),
        Err(_) => {
            let path = url.split(['?', '#']).next().unwrap_or_default();
            (String::new(), path.to_string())
        }
    }
}

/// Last non-empty path segment, ignoring trailing slashes.
fn last_segment(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or_default()
}

/// Short, human-legible identifier for a URL: the last path segment without its
/// extension, or the host when the path is empty or root.
///
/// - `http://i.imgur.com/UgOkLTf.jpg` → `UgOkLTf`
/// - `https://cloud-3.steamusercontent.com/ugc/123/2256A5C/` → `2256A5C`
pub fn stem(url: &str) -> String {
    let (host, path) = host_and_path(url);
    let stem = Path::new(last_segment(&path))
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    if stem.is_empty() {
        if host.is_empty() {
            url.to_string()
        } else {
            host
        }
    } else {
        stem.to_string()
    }
}

/// Guesses a file extension from the URL path; `.jpeg` becomes `.jpg` and
/// anything unrecognized (or missing) becomes `.jpg`.
pub fn guess_extension(url: &str) -> String {
    let (_, path) = host_and_path(url);
    let suffix = Path::new(last_segment(&path))
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()));

    match suffix.as_deref() {
        Some(".jpeg") => ".jpg".to_string(),
        Some(ext) if KNOWN_EXTENSIONS.contains(&ext) => ext.to_string(),
        _ => DEFAULT_EXTENSION.to_string(),
    }
}
