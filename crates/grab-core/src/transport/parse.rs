//! Parse HTTP response header lines into ResponseHead.

use super::ResponseHead;

/// Parse collected header lines into ResponseHead. When redirects produced
/// several header blocks, only the last one (starting at the last status line)
/// counts. `status` is taken from the final status line.
pub fn parse_headers(lines: &[String]) -> ResponseHead {
    let start = lines
        .iter()
        .rposition(|l| l.trim_start().starts_with("HTTP/"))
        .unwrap_or(0);

    let mut head = ResponseHead::default();
    for line in &lines[start..] {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            head.status = line
                .split_whitespace()
                .nth(1)
                .and_then(|s| s.parse().ok())
                .unwrap_or(0);
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-encoding") {
                head.content_encoding = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("last-modified") {
                head.last_modified = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.parse::<u64>() {
                    head.content_length = Some(n);
                }
            }
        }
    }
    head
}
