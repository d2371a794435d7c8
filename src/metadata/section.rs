//! Section-scoped `version = "..."` lookup in TOML documents
//!
//! The documents checked here (Cargo and pyproject manifests) only need one
//! key from one table, so a line-oriented scan is enough: find the
//! `[section]` header, cut the text at the next line that starts with `[`,
//! and look for a `version` assignment at the start of a line inside that
//! slice. Array values spread over several lines are indented or start with
//! `]`, so they never end the section early.

use regex::Regex;
use std::sync::OnceLock;

fn next_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\[").expect("valid regex"))
}

fn version_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?m)^version[ \t]*=[ \t]*"([^"]+)""#).expect("valid regex"))
}

/// Find the quoted `version` value declared directly under `[section]`
///
/// Returns `None` when the header is missing or the section has no
/// `version` key. Keys of the same name in other tables are never returned.
pub fn find_version_in_section(content: &str, section: &str) -> Option<String> {
    let header = Regex::new(&format!(r"(?m)^\[{}\][ \t]*\r?$", regex::escape(section)))
        .expect("escaped section name forms a valid regex");
    let header_match = header.find(content)?;

    let body_start = header_match.end();
    let rest = &content[body_start..];

    let body_end = next_header_re().find(rest).map_or(rest.len(), |m| m.start());
    let body = &rest[..body_end];

    version_re()
        .captures(body)
        .map(|caps| caps[1].to_string())
}
