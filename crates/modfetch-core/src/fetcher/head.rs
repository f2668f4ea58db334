//! Response head parsing from raw header lines collected by curl.

/// Status and content type of the last response in a redirect chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct ResponseHead {
    pub status: Option<u32>,
    pub content_type: Option<String>,
}

impl ResponseHead {
    /// Unknown status counts as success; curl's own response code is checked afterwards.
    pub fn is_success(&self) -> bool {
        self.status.map_or(true, |code| (200..300).contains(&code))
    }
}

/// Parse header lines of a single response (status line first).
pub(super) fn parse_head(lines: &[String]) -> ResponseHead {
    let mut head = ResponseHead::default();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            head.status = line
                .split_whitespace()
                .nth(1)
                .and_then(|code| code.parse().ok());
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-type") {
                head.content_type = Some(value.trim().to_string());
            }
        }
    }
    head
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn status_and_content_type() {
        let head = parse_head(&lines(&[
            "HTTP/1.1 200 OK",
            "Content-Length: 12",
            "content-type: image/png; charset=binary",
            "",
        ]));
        assert_eq!(head.status, Some(200));
        assert_eq!(head.content_type.as_deref(), Some("image/png; charset=binary"));
        assert!(head.is_success());
    }

    #[test]
    fn not_found() {
        let head = parse_head(&lines(&["HTTP/2 404", "Content-Type: text/html"]));
        assert_eq!(head.status, Some(404));
        assert!(!head.is_success());
    }

    #[test]
    fn missing_content_type() {
        let head = parse_head(&lines(&["HTTP/1.1 204 No Content"]));
        assert!(head.content_type.is_none());
    }
}
