//! Pinned revision lookup in the README's pre-commit snippet
//!
//! The README shows a `.pre-commit-config.yaml` example:
//!
//! ```text
//! repos:
//!   - repo: https://github.com/owner/project
//!     rev: v0.1.0-alpha.7
//! ```
//!
//! Only the first `repo:` line naming this project is considered, and only a
//! few lines after it are searched so that a later, unrelated `rev:` is never
//! picked up.

use regex::Regex;
use std::sync::OnceLock;

/// Number of lines after the marker searched by default
pub const DEFAULT_LOOKAHEAD: usize = 4;

fn rev_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"rev: (v\S+)").expect("valid regex"))
}

/// Find the `rev: v...` value pinned next to `repo: <repo_url>`
pub fn find_pinned_rev(content: &str, repo_url: &str, lookahead: usize) -> Option<String> {
    let marker = format!("repo: {}", repo_url);
    let lines: Vec<&str> = content.split('\n').collect();

    let start = lines.iter().position(|line| line.contains(&marker))?;
    let end = (start + 1 + lookahead).min(lines.len());

    for line in &lines[start + 1..end] {
        if let Some(caps) = rev_re().captures(line) {
            return Some(caps[1].to_string());
        }
        if line.contains("repo:") || line.trim() == "```" {
            break;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://github.com/owner/project";

    #[test]
    fn test_rev_on_next_line() {
        let content = "```yaml\nrepos:\n  - repo: https://github.com/owner/project\n    rev: v0.1.0-alpha.7\n    hooks:\n      - id: project\n```\n";
        assert_eq!(
            find_pinned_rev(content, URL, DEFAULT_LOOKAHEAD),
            Some("v0.1.0-alpha.7".to_string())
        );
    }

    #[test]
    fn test_rev_after_comment_and_blank_line() {
        let content = "  - repo: https://github.com/owner/project\n\n    # pin a release\n    rev: v1.2.3\n";
        assert_eq!(
            find_pinned_rev(content, URL, DEFAULT_LOOKAHEAD),
            Some("v1.2.3".to_string())
        );
    }

    #[test]
    fn test_rev_beyond_window_is_ignored() {
        let content = "  - repo: https://github.com/owner/project\n\n\n\n\n    rev: v1.2.3\n";
        assert_eq!(find_pinned_rev(content, URL, DEFAULT_LOOKAHEAD), None);
        assert_eq!(
            find_pinned_rev(content, URL, 5),
            Some("v1.2.3".to_string())
        );
    }

    #[test]
    fn test_stops_at_next_repo() {
        let content = "  - repo: https://github.com/owner/project\n  - repo: https://github.com/other/tool\n    rev: v9.9.9\n";
        assert_eq!(find_pinned_rev(content, URL, DEFAULT_LOOKAHEAD), None);
    }

    #[test]
    fn test_stops_at_fence() {
        let content = "  - repo: https://github.com/owner/project\n```\nrev: v9.9.9\n";
        assert_eq!(find_pinned_rev(content, URL, DEFAULT_LOOKAHEAD), None);
    }

    #[test]
    fn test_only_first_marker_is_considered() {
        let content = "- repo: https://github.com/owner/project\n```\n\n- repo: https://github.com/owner/project\n  rev: v2.0.0\n";
        assert_eq!(find_pinned_rev(content, URL, DEFAULT_LOOKAHEAD), None);
    }

    #[test]
    fn test_missing_marker() {
        let content = "# project\n\nrev: v1.0.0\n";
        assert_eq!(find_pinned_rev(content, URL, DEFAULT_LOOKAHEAD), None);
    }

    #[test]
    fn test_rev_without_v_prefix_is_not_matched() {
        let content = "- repo: https://github.com/owner/project\n  rev: 1.0.0\n";
        assert_eq!(find_pinned_rev(content, URL, DEFAULT_LOOKAHEAD), None);
    }

    #[test]
    fn test_marker_on_last_line() {
        let content = "- repo: https://github.com/owner/project";
        assert_eq!(find_pinned_rev(content, URL, DEFAULT_LOOKAHEAD), None);
    }
}
