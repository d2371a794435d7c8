use crate::domain::glob_matches;
use crate::error::{ReleaseError, Result};
use crate::git::{CommitInfo, Repository};
use std::cell::RefCell;
use std::collections::HashMap;

/// Mock repository for testing without actual git operations
///
/// Starts out as a clean `main` checkout in sync with `origin/main` and
/// with no tags or commits.
pub struct MockRepository {
    branch: String,
    pending: Vec<String>,
    head: String,
    remote_heads: HashMap<String, String>,
    remote_urls: HashMap<String, String>,
    ancestor_tags: Vec<String>,
    commits: Vec<CommitInfo>,
    fetch_error: Option<String>,
    fetched: RefCell<Vec<String>>,
}

impl MockRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        let head = "0".repeat(40);
        let mut remote_heads = HashMap::new();
        remote_heads.insert("origin/main".to_string(), head.clone());

        MockRepository {
            branch: "main".to_string(),
            pending: Vec::new(),
            head,
            remote_heads,
            remote_urls: HashMap::new(),
            ancestor_tags: Vec::new(),
            commits: Vec::new(),
            fetch_error: None,
            fetched: RefCell::new(Vec::new()),
        }
    }

    /// Check out a different branch
    pub fn set_branch(&mut self, branch: impl Into<String>) {
        self.branch = branch.into();
    }

    /// Mark a path as having uncommitted changes
    pub fn add_pending_change(&mut self, path: impl Into<String>) {
        self.pending.push(path.into());
    }

    /// Set the local HEAD commit id
    pub fn set_head(&mut self, commit: impl Into<String>) {
        self.head = commit.into();
    }

    /// Set the commit `<remote>/<branch>` points to
    pub fn set_remote_head(
        &mut self,
        remote: &str,
        branch: &str,
        commit: impl Into<String>,
    ) {
        self.remote_heads
            .insert(format!("{}/{}", remote, branch), commit.into());
    }

    pub fn set_remote_url(&mut self, remote: impl Into<String>, url: impl Into<String>) {
        self.remote_urls.insert(remote.into(), url.into());
    }

    /// Add a tag reachable from HEAD; later tags are more recent
    pub fn add_ancestor_tag(&mut self, name: impl Into<String>) {
        self.ancestor_tags.push(name.into());
    }

    /// Add a commit after the latest tag; later commits are newer
    pub fn add_commit(&mut self, info: CommitInfo) {
        self.commits.push(info);
    }

    /// Make the next fetch fail with the given message
    pub fn fail_fetch(&mut self, message: impl Into<String>) {
        self.fetch_error = Some(message.into());
    }

    /// Remotes fetched so far, in order
    pub fn fetched_remotes(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    fn pending_changes(&self) -> Result<Vec<String>> {
        Ok(self.pending.clone())
    }

    fn fetch(&self, remote: &str) -> Result<()> {
        self.fetched.borrow_mut().push(remote.to_string());
        match &self.fetch_error {
            Some(message) => Err(ReleaseError::precondition(format!(
                "Failed to fetch from '{}': {}",
                remote, message
            ))),
            None => Ok(()),
        }
    }

    fn head_commit(&self) -> Result<String> {
        Ok(self.head.clone())
    }

    fn remote_branch_commit(&self, remote: &str, branch: &str) -> Result<String> {
        let key = format!("{}/{}", remote, branch);
        self.remote_heads
            .get(&key)
            .cloned()
            .ok_or_else(|| ReleaseError::precondition(format!("Remote branch {} not found", key)))
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        Ok(self.remote_urls.get(remote).cloned())
    }

    fn describe_last_tag(&self, pattern: &str) -> Result<Option<String>> {
        Ok(self
            .ancestor_tags
            .iter()
            .rev()
            .find(|tag| glob_matches(pattern, tag))
            .cloned())
    }

    fn commits_since(&self, tag: &str) -> Result<Vec<CommitInfo>> {
        if !self.ancestor_tags.iter().any(|t| t == tag) {
            return Err(ReleaseError::precondition(format!("Unknown tag: {}", tag)));
        }
        Ok(self.commits.iter().rev().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_defaults() {
        let repo = MockRepository::default();
        assert_eq!(repo.current_branch().unwrap(), "main");
        assert!(repo.pending_changes().unwrap().is_empty());
        assert_eq!(
            repo.head_commit().unwrap(),
            repo.remote_branch_commit("origin", "main").unwrap()
        );
        assert_eq!(repo.describe_last_tag("v*").unwrap(), None);
    }

    #[test]
    fn test_mock_repository_describe_uses_pattern_and_recency() {
        let mut repo = MockRepository::new();
        repo.add_ancestor_tag("v0.1.0");
        repo.add_ancestor_tag("v0.2.0");
        repo.add_ancestor_tag("nightly-42");

        assert_eq!(
            repo.describe_last_tag("v*").unwrap(),
            Some("v0.2.0".to_string())
        );
        assert_eq!(
            repo.describe_last_tag("nightly-*").unwrap(),
            Some("nightly-42".to_string())
        );
    }

    #[test]
    fn test_mock_repository_commits_newest_first() {
        let mut repo = MockRepository::new();
        repo.add_ancestor_tag("v0.1.0");
        repo.add_commit(CommitInfo::new("aaa1111", "first"));
        repo.add_commit(CommitInfo::new("bbb2222", "second"));

        let commits = repo.commits_since("v0.1.0").unwrap();
        assert_eq!(commits[0].summary, "second");
        assert_eq!(commits[1].summary, "first");
        assert!(repo.commits_since("v9.9.9").is_err());
    }

    #[test]
    fn test_mock_repository_records_fetches() {
        let mut repo = MockRepository::new();
        repo.fetch("origin").unwrap();
        repo.fail_fetch("network unreachable");
        assert!(repo.fetch("upstream").is_err());
        assert_eq!(
            repo.fetched_remotes(),
            vec!["origin".to_string(), "upstream".to_string()]
        );
    }
}
