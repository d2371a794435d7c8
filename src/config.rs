use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};
use crate::metadata::readme::DEFAULT_LOOKAHEAD;

/// File name searched in the current directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "releasedraft.toml";

/// Represents the complete configuration for release-draft.
///
/// Every field has a default, so an empty file (or no file) gives the
/// canonical workflow: release from `main`, compare with `origin`, tags `v*`,
/// Cargo + pyproject + README consistency checks, notes from `claude`,
/// draft release through `gh`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default = "default_manifests")]
    pub manifests: Vec<ManifestCheck>,

    #[serde(default)]
    pub readme: ReadmeCheck,

    #[serde(default)]
    pub notes: NotesConfig,

    #[serde(default)]
    pub publish: PublishConfig,
}

/// Repository preconditions and tag naming.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RepositoryConfig {
    #[serde(default = "default_branch")]
    pub branch: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    /// Glob passed to tag discovery, as with `git describe --match`
    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,

    /// Prefix of the release tag created from the semver version
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_tag_pattern() -> String {
    "v*".to_string()
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            branch: default_branch(),
            remote: default_remote(),
            tag_pattern: default_tag_pattern(),
            tag_prefix: default_tag_prefix(),
        }
    }
}

/// Which rendering of the version a manifest is expected to record.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VersionFormat {
    /// `0.1.0-alpha.7`
    Semver,
    /// `0.1.0a7`
    Pep440,
}

/// A TOML document whose `[section]` must declare the release version.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ManifestCheck {
    pub path: String,
    pub section: String,
    pub format: VersionFormat,
}

fn default_manifests() -> Vec<ManifestCheck> {
    vec![
        ManifestCheck {
            path: "Cargo.toml".to_string(),
            section: "workspace.package".to_string(),
            format: VersionFormat::Semver,
        },
        ManifestCheck {
            path: "pyproject.toml".to_string(),
            section: "project".to_string(),
            format: VersionFormat::Pep440,
        },
    ]
}

/// The README's pinned `rev:` next to this project's `repo:` line.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReadmeCheck {
    /// `false` skips the README check entirely
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_readme_path")]
    pub path: String,

    /// Repository URL on the `repo:` line; derived from the remote when unset
    #[serde(default)]
    pub repo_url: Option<String>,

    #[serde(default = "default_lookahead")]
    pub lookahead: usize,
}

fn default_readme_path() -> String {
    "README.md".to_string()
}

fn default_lookahead() -> usize {
    DEFAULT_LOOKAHEAD
}

fn default_enabled() -> bool {
    true
}

impl Default for ReadmeCheck {
    fn default() -> Self {
        ReadmeCheck {
            enabled: default_enabled(),
            path: default_readme_path(),
            repo_url: None,
            lookahead: default_lookahead(),
        }
    }
}

/// External text-generation tool used for release notes.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NotesConfig {
    #[serde(default = "default_notes_command")]
    pub command: String,

    /// Arguments placed before the prompt
    #[serde(default = "default_notes_args")]
    pub args: Vec<String>,

    /// Project description used in the prompt; defaults to the repository directory name
    #[serde(default)]
    pub project: Option<String>,
}

fn default_notes_command() -> String {
    "claude".to_string()
}

fn default_notes_args() -> Vec<String> {
    vec!["--print".to_string()]
}

impl Default for NotesConfig {
    fn default() -> Self {
        NotesConfig {
            command: default_notes_command(),
            args: default_notes_args(),
            project: None,
        }
    }
}

/// External release-hosting CLI.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PublishConfig {
    #[serde(default = "default_publish_command")]
    pub command: String,
}

fn default_publish_command() -> String {
    "gh".to_string()
}

impl Default for PublishConfig {
    fn default() -> Self {
        PublishConfig {
            command: default_publish_command(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ReleaseError::config(e.to_string()))
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasedraft.toml` in current directory
/// 3. `~/.config/.releasedraft.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let path = if let Some(path) = config_path {
        Path::new(path).to_path_buf()
    } else if local.exists() {
        local
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user_path.exists() {
            user_path
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let content = fs::read_to_string(&path).map_err(|e| ReleaseError::read(&path, e))?;
    Config::from_toml(&content)
}

impl Default for Config {
    fn default() -> Self {
        Config {
            repository: RepositoryConfig::default(),
            manifests: default_manifests(),
            readme: ReadmeCheck::default(),
            notes: NotesConfig::default(),
            publish: PublishConfig::default(),
        }
    }
}
