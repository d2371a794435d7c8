use crate::error::{ReleaseError, Result};
use crate::git::CommitInfo;
use git2::{
    Cred, CredentialType, DescribeFormatOptions, DescribeOptions, FetchOptions, RemoteCallbacks,
    Repository as Git2Repo, Sort, StatusOptions,
};
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Root of the working tree
    pub fn workdir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| ReleaseError::precondition("Repository has no working tree (bare)"))
    }
}

/// SSH keys from ~/.ssh, then the agent, then git's default credentials.
fn credentials_callbacks<'a>() -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(CredentialType::SSH_KEY) {
            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }

            if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }

        Cred::default()
    });
    callbacks
}

impl super::Repository for Git2Repository {
    fn current_branch(&self) -> Result<String> {
        let head = self
            .repo
            .head()
            .map_err(|e| ReleaseError::precondition(format!("Cannot resolve HEAD: {}", e)))?;

        if !head.is_branch() {
            return Ok("HEAD".to_string());
        }

        Ok(head.shorthand().unwrap_or("HEAD").to_string())
    }

    fn pending_changes(&self) -> Result<Vec<String>> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;

        Ok(statuses
            .iter()
            .filter(|entry| entry.status() != git2::Status::CURRENT)
            .map(|entry| entry.path().unwrap_or("(non-utf8 path)").to_string())
            .collect())
    }

    fn fetch(&self, remote: &str) -> Result<()> {
        let mut remote_handle = self
            .repo
            .find_remote(remote)
            .map_err(|_| ReleaseError::precondition(format!("Remote '{}' not found", remote)))?;

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(credentials_callbacks());

        let refspec_heads = format!("+refs/heads/*:refs/remotes/{}/*", remote);
        let refspecs = [refspec_heads.as_str(), "+refs/tags/*:refs/tags/*"];

        remote_handle
            .fetch(&refspecs, Some(&mut fetch_options), None)
            .map_err(|e| {
                ReleaseError::precondition(format!("Failed to fetch from '{}': {}", remote, e))
            })?;

        Ok(())
    }

    fn head_commit(&self) -> Result<String> {
        let commit = self.repo.head()?.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    fn remote_branch_commit(&self, remote: &str, branch: &str) -> Result<String> {
        let reference_name = format!("refs/remotes/{}/{}", remote, branch);

        let reference = self.repo.find_reference(&reference_name).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                ReleaseError::precondition(format!(
                    "Remote branch {}/{} not found",
                    remote, branch
                ))
            } else {
                ReleaseError::Git(e)
            }
        })?;

        Ok(reference.peel_to_commit()?.id().to_string())
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        match self.repo.find_remote(remote) {
            Ok(handle) => Ok(handle.url().map(|url| url.to_string())),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(ReleaseError::Git(e)),
        }
    }

    fn describe_last_tag(&self, pattern: &str) -> Result<Option<String>> {
        let mut options = DescribeOptions::new();
        options.describe_tags().pattern(pattern);

        // libgit2 reports "no reachable tag" as an error, same as `git describe`
        let describe = match self.repo.describe(&options) {
            Ok(describe) => describe,
            Err(_) => return Ok(None),
        };

        let mut format_options = DescribeFormatOptions::new();
        format_options.abbreviated_size(0);
        let tag = describe.format(Some(&format_options))?;

        if tag.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(tag.trim().to_string()))
        }
    }

    fn commits_since(&self, tag: &str) -> Result<Vec<CommitInfo>> {
        let tag_commit = self
            .repo
            .revparse_single(&format!("refs/tags/{}", tag))?
            .peel_to_commit()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push_head()?;
        revwalk.hide(tag_commit.id())?;

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let commit = self.repo.find_commit(oid_result?)?;
            let short_id = commit.as_object().short_id()?;

            commits.push(CommitInfo {
                hash: short_id.as_str().unwrap_or_default().to_string(),
                summary: commit.summary().unwrap_or("(empty message)").to_string(),
            });
        }

        Ok(commits)
    }
}
