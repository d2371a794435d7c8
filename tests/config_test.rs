use release_draft::config::{load_config, Config, VersionFormat, CONFIG_FILE_NAME};
use serial_test::serial;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

/// Restores the working directory when dropped
struct CwdGuard(std::path::PathBuf);

impl CwdGuard {
    fn enter(dir: &std::path::Path) -> Self {
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        CwdGuard(previous)
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.0);
    }
}

#[test]
fn test_load_from_explicit_path() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[repository]
branch = "trunk"
remote = "upstream"

[[manifests]]
path = "pyproject.toml"
section = "project"
format = "pep440"

[readme]
repo_url = "https://github.com/owner/project"

[notes]
command = "llm"
args = []

[publish]
command = "gh"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.repository.branch, "trunk");
    assert_eq!(config.repository.remote, "upstream");
    assert_eq!(config.repository.tag_pattern, "v*");
    assert_eq!(config.manifests.len(), 1);
    assert_eq!(config.manifests[0].format, VersionFormat::Pep440);
    let readme = config.readme;
    assert!(readme.enabled);
    assert_eq!(
        readme.repo_url.as_deref(),
        Some("https://github.com/owner/project")
    );
    assert_eq!(readme.path, "README.md");
    assert_eq!(readme.lookahead, 4);
    assert_eq!(config.notes.command, "llm");
    assert!(config.notes.args.is_empty());
}

#[test]
fn test_explicit_path_missing_is_error() {
    let err = load_config(Some("/nonexistent/releasedraft.toml")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/releasedraft.toml"));
}

#[test]
fn test_invalid_toml_is_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[repository\nbranch = ").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
#[serial]
fn test_discovers_file_in_current_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[repository]\nbranch = \"release\"\n",
    )
    .unwrap();

    let _guard = CwdGuard::enter(dir.path());
    let config = load_config(None).unwrap();
    assert_eq!(config.repository.branch, "release");
}

#[test]
#[serial]
fn test_local_file_absent_falls_back() {
    let dir = TempDir::new().unwrap();
    let _guard = CwdGuard::enter(dir.path());

    // Falls back to the user config file if one exists, otherwise defaults
    let config = load_config(None).unwrap();
    let user_file = dirs::config_dir().map(|d| d.join(format!(".{}", CONFIG_FILE_NAME)));
    if !user_file.map(|p| p.exists()).unwrap_or(false) {
        assert_eq!(config, Config::default());
    }
}
