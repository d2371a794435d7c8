use regex::Regex;

/// Release tag naming: a fixed prefix in front of the semver string
#[derive(Debug, Clone)]
pub struct TagPattern {
    pub prefix: String,
}

impl TagPattern {
    pub fn new(prefix: impl Into<String>) -> Self {
        TagPattern {
            prefix: prefix.into(),
        }
    }

    /// Format a version according to pattern
    /// Example: prefix="v", version="0.1.0-alpha.7" -> "v0.1.0-alpha.7"
    pub fn format(&self, version: &str) -> String {
        format!("{}{}", self.prefix, version)
    }

    /// Strip the prefix from a tag name, if present
    pub fn version_part<'a>(&self, tag: &'a str) -> Option<&'a str> {
        tag.strip_prefix(self.prefix.as_str())
    }
}

/// Match a tag name against a git-style glob (`*` and `?` only)
///
/// Mirrors the subset of fnmatch used by `git describe --match`.
pub fn glob_matches(pattern: &str, tag: &str) -> bool {
    let mut regex_pattern = String::from("^");
    for c in pattern.chars() {
        match c {
            '*' => regex_pattern.push_str(".*"),
            '?' => regex_pattern.push('.'),
            other => regex_pattern.push_str(&regex::escape(&other.to_string())),
        }
    }
    regex_pattern.push('$');

    Regex::new(&regex_pattern)
        .map(|re| re.is_match(tag))
        .unwrap_or(false)
}
