//! Content-Type → extension mapping.

use super::DEFAULT_EXTENSION;

/// Maps a `Content-Type` value to a file extension.
///
/// Parameters (`; charset=...`) are ignored. Unknown or empty types map to `.jpg`.
pub fn extension_from_content_type(content_type: &str) -> &'static str {
    let primary = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match primary.as_str() {
        "image/jpeg" | "image/jpg" => ".jpg",
        "image/png" => ".png",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        _ => DEFAULT_EXTENSION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_parameters() {
        assert_eq!(extension_from_content_type("image/png; charset=binary"), ".png");
        assert_eq!(extension_from_content_type(" Image/WEBP "), ".webp");
    }

    #[test]
    fn jpeg_aliases() {
        assert_eq!(extension_from_content_type("image/jpeg"), ".jpg");
        assert_eq!(extension_from_content_type("image/jpg"), ".jpg");
    }

    #[test]
    fn unknown_defaults_to_jpg() {
        assert_eq!(extension_from_content_type("text/html; charset=utf-8"), ".jpg");
        assert_eq!(extension_from_content_type("application/octet-stream"), ".jpg");
        assert_eq!(extension_from_content_type(""), ".jpg");
    }
}
