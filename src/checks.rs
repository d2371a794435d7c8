//! Repository preconditions checked before anything is released
//!
//! Each gate inspects the repository and either passes or fails with a
//! message naming what was observed. Only [check_remote_sync] has a side
//! effect: it fetches the remote, which updates remote-tracking refs and
//! tags but never the working tree.

use crate::error::{ReleaseError, Result};
use crate::git::Repository;

/// How many changed paths to list when the tree is dirty
const MAX_LISTED_CHANGES: usize = 5;

/// The checked-out branch must be `expected`
pub fn check_branch<R: Repository + ?Sized>(repo: &R, expected: &str) -> Result<String> {
    let branch = repo.current_branch()?;
    if branch != expected {
        return Err(ReleaseError::precondition(format!(
            "Not on {} branch (currently on {})",
            expected, branch
        )));
    }
    Ok(branch)
}

/// No untracked, modified or staged files
pub fn check_working_tree<R: Repository + ?Sized>(repo: &R) -> Result<()> {
    let changes = repo.pending_changes()?;
    if changes.is_empty() {
        return Ok(());
    }

    let mut listed = changes
        .iter()
        .take(MAX_LISTED_CHANGES)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if changes.len() > MAX_LISTED_CHANGES {
        listed.push_str(&format!(", ... and {} more", changes.len() - MAX_LISTED_CHANGES));
    }

    Err(ReleaseError::precondition(format!(
        "Working tree is not clean: {}",
        listed
    )))
}

/// Fetch `remote` and require HEAD to equal `<remote>/<branch>`
///
/// Returns the shared commit id.
pub fn check_remote_sync<R: Repository + ?Sized>(
    repo: &R,
    remote: &str,
    branch: &str,
) -> Result<String> {
    repo.fetch(remote)?;

    let local = repo.head_commit()?;
    let upstream = repo.remote_branch_commit(remote, branch)?;

    if local != upstream {
        return Err(ReleaseError::precondition(format!(
            "Local HEAD does not match {}/{}. Run: git pull",
            remote, branch
        )));
    }
    Ok(local)
}

/// Most recent tag matching `pattern` reachable from HEAD
///
/// The first release has no earlier tag to diff against and must be made by hand.
pub fn find_last_tag<R: Repository + ?Sized>(repo: &R, pattern: &str) -> Result<String> {
    repo.describe_last_tag(pattern)?.ok_or_else(|| {
        ReleaseError::precondition(
            "No previous tag found. First release must be created manually.",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    #[test]
    fn test_branch_ok() {
        let repo = MockRepository::new();
        assert_eq!(check_branch(&repo, "main").unwrap(), "main");
    }

    #[test]
    fn test_branch_mismatch_names_actual_branch() {
        let mut repo = MockRepository::new();
        repo.set_branch("feature/x");
        let err = check_branch(&repo, "main").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Not on main branch (currently on feature/x)"
        );
    }

    #[test]
    fn test_working_tree_clean() {
        let repo = MockRepository::new();
        assert!(check_working_tree(&repo).is_ok());
    }

    #[test]
    fn test_working_tree_dirty_lists_paths() {
        let mut repo = MockRepository::new();
        repo.add_pending_change("src/lib.rs");
        repo.add_pending_change("notes.txt");
        let err = check_working_tree(&repo).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Working tree is not clean: src/lib.rs, notes.txt"
        );
    }

    #[test]
    fn test_working_tree_dirty_truncates_long_lists() {
        let mut repo = MockRepository::new();
        for i in 0..8 {
            repo.add_pending_change(format!("file{}.txt", i));
        }
        let msg = check_working_tree(&repo).unwrap_err().to_string();
        assert!(msg.contains("file4.txt"));
        assert!(!msg.contains("file5.txt"));
        assert!(msg.ends_with("... and 3 more"));
    }

    #[test]
    fn test_remote_sync_fetches_then_compares() {
        let repo = MockRepository::new();
        check_remote_sync(&repo, "origin", "main").unwrap();
        assert_eq!(repo.fetched_remotes(), vec!["origin".to_string()]);
    }

    #[test]
    fn test_remote_sync_mismatch() {
        let mut repo = MockRepository::new();
        repo.set_remote_head("origin", "main", "f".repeat(40));
        let err = check_remote_sync(&repo, "origin", "main").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Local HEAD does not match origin/main. Run: git pull"
        );
    }

    #[test]
    fn test_remote_sync_fetch_failure() {
        let mut repo = MockRepository::new();
        repo.fail_fetch("could not resolve host");
        let err = check_remote_sync(&repo, "origin", "main").unwrap_err();
        assert!(err.to_string().contains("could not resolve host"));
    }

    #[test]
    fn test_find_last_tag() {
        let mut repo = MockRepository::new();
        repo.add_ancestor_tag("v0.1.0-alpha.6");
        assert_eq!(find_last_tag(&repo, "v*").unwrap(), "v0.1.0-alpha.6");
    }

    #[test]
    fn test_find_last_tag_none() {
        let mut repo = MockRepository::new();
        repo.add_ancestor_tag("nightly");
        let err = find_last_tag(&repo, "v*").unwrap_err();
        assert!(err.to_string().contains("First release must be created manually"));
    }
}
