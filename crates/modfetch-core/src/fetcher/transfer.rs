//! Single-asset HTTP GET with content-type extension correction.
//!
//! Blocking (libcurl easy handle); the async layer runs it on tokio's blocking
//! pool. The body is buffered in memory and written atomically once the
//! transfer has succeeded.

use super::claims::PathClaims;
use super::error::FetchError;
use super::head::{parse_head, ResponseHead};
use super::FetchOptions;
use crate::storage;
use crate::url_model::{extension_from_content_type, extension_of, with_extension};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::str;

/// How a fetched URL ended up on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Fetched {
    /// Body written to this path.
    Written { path: PathBuf, bytes: usize },
    /// A file was already there (planned or corrected path); nothing written.
    Existing(PathBuf),
}

/// Where the body of a 2xx response goes, decided once the head is known.
#[derive(Debug)]
enum Target {
    Write(PathBuf),
    Existing(PathBuf),
    /// Non-2xx body: read and dropped.
    Discard,
}

/// Decide the final path from the response head: the content type overrides
/// the planned extension; an existing corrected file is reused.
fn choose_target(planned: &Path, head: &ResponseHead) -> Target {
    if !head.is_success() {
        return Target::Discard;
    }
    let ext = extension_from_content_type(head.content_type.as_deref().unwrap_or_default());
    let path = if extension_of(planned) == ext {
        planned.to_path_buf()
    } else {
        with_extension(planned, ext)
    };
    if path != planned && path.exists() {
        return Target::Existing(path);
    }
    Target::Write(path)
}

/// Fetch `url` into `planned` (or its extension-corrected sibling).
pub(super) fn fetch_to_path(
    url: &str,
    planned: &Path,
    opts: &FetchOptions,
    claims: &PathClaims,
) -> Result<Fetched, FetchError> {
    if planned.exists() {
        return Ok(Fetched::Existing(planned.to_path_buf()));
    }

    let header_lines: RefCell<Vec<String>> = RefCell::new(Vec::new());
    let mut body: Vec<u8> = Vec::new();
    let mut target: Option<Target> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirections)?;
    easy.connect_timeout(opts.connect_timeout)?;
    // Stalled transfers are cut by the low-speed window; the overall cap is a safety net.
    easy.low_speed_limit(opts.low_speed_limit)?;
    easy.low_speed_time(opts.low_speed_time)?;
    easy.timeout(opts.max_transfer_time)?;
    easy.useragent(&opts.user_agent)?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                let line = s.trim_end();
                let mut lines = header_lines.borrow_mut();
                // Each response in a redirect chain starts with a status line.
                if line.starts_with("HTTP/") {
                    lines.clear();
                }
                lines.push(line.to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            let decided = target
                .get_or_insert_with(|| choose_target(planned, &parse_head(&header_lines.borrow())));
            match decided {
                Target::Write(_) => {
                    body.extend_from_slice(data);
                    Ok(data.len())
                }
                Target::Discard => Ok(data.len()),
                // Abort: the file is already there, no need for the body.
                Target::Existing(_) => Ok(0),
            }
        })?;
        transfer.perform()
    };

    if let Err(e) = performed {
        return match target {
            Some(Target::Existing(path)) if e.is_write_error() => Ok(Fetched::Existing(path)),
            _ => Err(FetchError::Curl(e)),
        };
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }

    // Empty bodies never reach the write callback.
    let target = match target {
        Some(t) => t,
        None => choose_target(planned, &parse_head(&header_lines.into_inner())),
    };

    match target {
        Target::Existing(path) => Ok(Fetched::Existing(path)),
        Target::Discard => Err(FetchError::Http(code)),
        Target::Write(path) => write_once(path, &body, claims),
    }
}

/// Writes `body` to `path` unless another URL produced the file first.
///
/// Holding the path while checking and writing makes a concurrent writer of the
/// same path wait: it then finds the file, or writes its own body if ours failed.
fn write_once(path: PathBuf, body: &[u8], claims: &PathClaims) -> Result<Fetched, FetchError> {
    let _claim = claims.hold(&path);
    if path.exists() {
        return Ok(Fetched::Existing(path));
    }
    storage::write_atomic(&path, body).map_err(FetchError::Storage)?;
    Ok(Fetched::Written {
        bytes: body.len(),
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn head(status: u32, content_type: Option<&str>) -> ResponseHead {
        ResponseHead {
            status: Some(status),
            content_type: content_type.map(str::to_string),
        }
    }

    #[test]
    fn target_keeps_planned_when_extension_matches() {
        let planned = Path::new("/nonexistent/out/a_face.png");
        match choose_target(planned, &head(200, Some("image/png"))) {
            Target::Write(p) => assert_eq!(p, planned),
            other => panic!("expected write, got {:?}", other),
        }
    }

    #[test]
    fn target_corrected_from_content_type() {
        let planned = Path::new("/nonexistent/out/a_face.jpg");
        match choose_target(planned, &head(200, Some("image/webp"))) {
            Target::Write(p) => assert_eq!(p, Path::new("/nonexistent/out/a_face.webp")),
            other => panic!("expected write, got {:?}", other),
        }
    }

    #[test]
    fn target_missing_content_type_defaults_to_jpg() {
        let planned = Path::new("/nonexistent/out/a_face.png");
        match choose_target(planned, &head(200, None)) {
            Target::Write(p) => assert_eq!(p, Path::new("/nonexistent/out/a_face.jpg")),
            other => panic!("expected write, got {:?}", other),
        }
    }

    #[test]
    fn target_reuses_existing_corrected_file() {
        let dir = tempfile::tempdir().unwrap();
        let planned = dir.path().join("a_face.jpg");
        std::fs::write(dir.path().join("a_face.png"), b"png").unwrap();
        match choose_target(&planned, &head(200, Some("image/png"))) {
            Target::Existing(p) => assert_eq!(p, dir.path().join("a_face.png")),
            other => panic!("expected existing, got {:?}", other),
        }
    }

    #[test]
    fn write_once_reuses_file_written_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a_face.png");
        let claims = PathClaims::default();
        assert_eq!(
            write_once(path.clone(), b"first", &claims).unwrap(),
            Fetched::Written {
                path: path.clone(),
                bytes: 5
            }
        );
        assert_eq!(
            write_once(path.clone(), b"second", &claims).unwrap(),
            Fetched::Existing(path.clone())
        );
        assert_eq!(std::fs::read(&path).unwrap(), b"first");
        assert!(!claims.is_held(&path));
    }

    #[test]
    fn write_once_failure_releases_path() {
        let dir = tempfile::tempdir().unwrap();
        // Parent is a file, so the write fails.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let path = blocker.join("a_face.png");
        let claims = PathClaims::default();
        assert!(matches!(
            write_once(path.clone(), b"body", &claims),
            Err(FetchError::Storage(_))
        ));
        assert!(!claims.is_held(&path));
    }

    #[test]
    fn non_success_is_discarded() {
        assert!(matches!(
            choose_target(Path::new("/x/a.jpg"), &head(404, Some("text/html"))),
            Target::Discard
        ));
    }
}
