use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for release-draft operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    Precondition(String),

    #[error("Version mismatch in {file}. Found {}, expected {expected}", .found.as_deref().unwrap_or("nothing"))]
    Mismatch {
        file: String,
        found: Option<String>,
        expected: String,
    },

    #[error("`{command}` failed with exit code {code}{}", format_stderr(.stderr))]
    Tool {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Cannot run `{command}`")]
    ToolStart {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Git operation failed")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{}", trimmed)
    }
}

/// Convenience type alias for Results in release-draft
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a usage error
    pub fn usage(msg: impl Into<String>) -> Self {
        ReleaseError::Usage(msg.into())
    }

    /// Create a precondition failure (wrong branch, dirty tree, no tag...)
    pub fn precondition(msg: impl Into<String>) -> Self {
        ReleaseError::Precondition(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version mismatch error for a metadata file
    pub fn mismatch(
        file: impl Into<String>,
        found: Option<String>,
        expected: impl Into<String>,
    ) -> Self {
        ReleaseError::Mismatch {
            file: file.into(),
            found,
            expected: expected.into(),
        }
    }

    /// Create an error for a file that could not be read
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReleaseError::Read {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_mismatch_display() {
        let err = ReleaseError::mismatch(
            "README.md",
            Some("v0.1.0-alpha.6".to_string()),
            "v0.1.0-alpha.7",
        );
        assert_eq!(
            err.to_string(),
            "Version mismatch in README.md. Found v0.1.0-alpha.6, expected v0.1.0-alpha.7"
        );
    }

    #[test]
    fn test_mismatch_display_when_absent() {
        let err = ReleaseError::mismatch("Cargo.toml", None, "1.0.0");
        assert_eq!(
            err.to_string(),
            "Version mismatch in Cargo.toml. Found nothing, expected 1.0.0"
        );
    }

    #[test]
    fn test_tool_error_includes_stderr() {
        let err = ReleaseError::Tool {
            command: "gh release create".to_string(),
            code: 1,
            stderr: "  not authenticated\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "`gh release create` failed with exit code 1\nnot authenticated"
        );
    }

    #[test]
    fn test_tool_error_without_stderr() {
        let err = ReleaseError::Tool {
            command: "claude --print".to_string(),
            code: 2,
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "`claude --print` failed with exit code 2");
    }

    #[test]
    fn test_read_error_names_path() {
        let err = ReleaseError::read(
            "/tmp/missing/Cargo.toml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        );
        assert_eq!(err.to_string(), "Cannot read /tmp/missing/Cargo.toml");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "No such file");
    }

    #[test]
    fn test_error_chain_prints_source_once() {
        let err = ReleaseError::read(
            "/nonexistent.toml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        );
        let chained = format!("{:#}", anyhow::Error::from(err).context("Error loading config"));
        assert_eq!(
            chained,
            "Error loading config: Cannot read /nonexistent.toml: No such file"
        );

        let git = git2::Error::from_str("reference not found");
        let chained = format!("{:#}", anyhow::Error::from(ReleaseError::from(git)));
        assert_eq!(chained.matches("reference not found").count(), 1);
    }

    #[test]
    fn test_usage_and_precondition_are_verbatim() {
        assert_eq!(
            ReleaseError::usage("Invalid version format").to_string(),
            "Invalid version format"
        );
        assert_eq!(
            ReleaseError::precondition("Working tree is not clean").to_string(),
            "Working tree is not clean"
        );
    }
}
