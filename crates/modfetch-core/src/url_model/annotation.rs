//! Annotation marker stripping (`{Unique}`, `{verifycache}` and friends).

use regex::Regex;
use std::sync::OnceLock;

fn annotation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{[^}]*\}").expect("static annotation regex"))
}

/// Removes brace-delimited annotation tokens and surrounding whitespace.
///
/// Returns an empty string for empty input; callers treat empty as "no asset".
pub fn clean(url: &str) -> String {
    annotation_re().replace_all(url, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markers_and_whitespace() {
        assert_eq!(
            clean("{Unique}http://i.imgur.com/UgOkLTf.jpg "),
            "http://i.imgur.com/UgOkLTf.jpg"
        );
        assert_eq!(
            clean("  {verifycache}https://example.com/a{x}.png"),
            "https://example.com/a.png"
        );
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   "), "");
        assert_eq!(clean("{Unique}"), "");
    }

    #[test]
    fn unclosed_brace_is_kept() {
        assert_eq!(clean("https://example.com/{a.png"), "https://example.com/{a.png");
    }
}
