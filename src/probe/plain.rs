use super::{ProbeRecord, ProbeStatus};
use once_cell::sync::Lazy;
use regex::Regex;

static ANSI_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("ANSI escape pattern compiles"));

/// Parses one `<url> [<status>]` line. Lines without that shape yield `None`.
pub fn parse_line(line: &str) -> Option<ProbeRecord> {
    let line = ANSI_ESCAPE.replace_all(line, "");
    let (url, rest) = line.split_once(" [")?;
    let (token, _) = rest.split_once(']')?;

    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    Some(ProbeRecord::new(url, ProbeStatus::from_token(token)))
}
