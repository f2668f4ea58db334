//! Nickname → file-name fragment.

/// Placeholder used when a nickname sanitizes to nothing.
const UNNAMED: &str = "unnamed";

/// Converts a nickname into a safe, lowercase file-name fragment.
///
/// - Every run of characters other than word characters and `-` becomes one `_`
/// - Consecutive underscores collapse
/// - Leading/trailing underscores are trimmed
/// - Empty result becomes `"unnamed"`
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.trim().chars() {
        let keep = c.is_alphanumeric() || c == '-';
        if keep {
            out.push(c);
            prev_underscore = false;
        } else if !prev_underscore {
            out.push('_');
            prev_underscore = true;
        }
    }

    let trimmed = out.trim_matches('_').to_lowercase();
    if trimmed.is_empty() {
        UNNAMED.to_string()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_and_collapses() {
        assert_eq!(sanitize_name("Doc Holliday (Wounded)"), "doc_holliday_wounded");
        assert_eq!(sanitize_name("a__b"), "a_b");
        assert_eq!(sanitize_name("Hex-Tile #3"), "hex-tile_3");
    }

    #[test]
    fn trims_underscores() {
        assert_eq!(sanitize_name("  !!Token!!  "), "token");
        assert_eq!(sanitize_name("_x_"), "x");
    }

    #[test]
    fn empty_becomes_unnamed() {
        assert_eq!(sanitize_name(""), "unnamed");
        assert_eq!(sanitize_name("???"), "unnamed");
    }

    #[test]
    fn keeps_unicode_letters() {
        assert_eq!(sanitize_name("Café Noir"), "café_noir");
    }
}
