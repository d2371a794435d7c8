//! Git operations abstraction layer
//!
//! Every repository query the release workflow makes goes through the
//! [Repository] trait, so the gate chain can run against a real repository
//! or a scripted one.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! ```rust
//! # use release_draft::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> release_draft::Result<()> {
//! if let Some(tag) = repo.describe_last_tag("v*")? {
//!     let commits = repo.commits_since(&tag)?;
//!     println!("{} commits since {}", commits.len(), tag);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Commit information for release notes
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The commit hash (abbreviated)
    pub hash: String,
    /// First line of the commit message
    pub summary: String,
}

impl CommitInfo {
    pub fn new(hash: impl Into<String>, summary: impl Into<String>) -> Self {
        CommitInfo {
            hash: hash.into(),
            summary: summary.into(),
        }
    }

    /// `<hash> <summary>`, the `git log --oneline` shape
    pub fn oneline(&self) -> String {
        format!("{} {}", self.hash, self.summary)
    }
}

/// Repository queries used by the release workflow
///
/// Only [Repository::fetch] touches anything, and it only updates
/// remote-tracking refs and tags; the working tree and local branches are
/// never modified.
pub trait Repository {
    /// Name of the checked-out branch, or `HEAD` when detached
    fn current_branch(&self) -> Result<String>;

    /// Paths with pending changes: untracked, modified or staged
    ///
    /// Empty when the working tree is clean.
    fn pending_changes(&self) -> Result<Vec<String>>;

    /// Fetch branches and tags from a remote
    fn fetch(&self, remote: &str) -> Result<()>;

    /// Full commit id of HEAD
    fn head_commit(&self) -> Result<String>;

    /// Full commit id of `<remote>/<branch>` as last fetched
    fn remote_branch_commit(&self, remote: &str, branch: &str) -> Result<String>;

    /// URL configured for a remote, if any
    fn remote_url(&self, remote: &str) -> Result<Option<String>>;

    /// Most recent tag matching `pattern` that is an ancestor of HEAD
    ///
    /// Both lightweight and annotated tags are considered. Returns
    /// `Ok(None)` when no such tag exists.
    fn describe_last_tag(&self, pattern: &str) -> Result<Option<String>>;

    /// Commits reachable from HEAD but not from `tag`, newest first
    fn commits_since(&self, tag: &str) -> Result<Vec<CommitInfo>>;
}

/// Turn a remote URL into the browsable `https://host/owner/repo` form
///
/// Handles `git@host:owner/repo.git`, `ssh://git@host/owner/repo.git` and
/// `https://host/owner/repo(.git)`.
pub fn browse_url(remote_url: &str) -> String {
    let url = remote_url.trim().trim_end_matches('/');
    let url = url.strip_suffix(".git").unwrap_or(url);

    if let Some(rest) = url.strip_prefix("ssh://") {
        let rest = rest.split_once('@').map_or(rest, |(_, host_path)| host_path);
        return format!("https://{}", rest);
    }

    if !url.contains("://") {
        if let Some((user_host, path)) = url.split_once(':') {
            let host = user_host
                .split_once('@')
                .map_or(user_host, |(_, host)| host);
            return format!("https://{}/{}", host, path);
        }
    }

    if let Some(rest) = url.strip_prefix("http://") {
        return format!("https://{}", rest);
    }

    url.to_string()
}
