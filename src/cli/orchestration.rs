//! Main release workflow
//!
//! Runs the gates in order and stops at the first failure:
//!
//! 1. Branch, working tree and remote sync checks
//! 2. Last tag discovery
//! 3. Version consistency across manifests and README
//! 4. Commit collection since the last tag
//! 5. Release notes generation
//! 6. Draft release creation (skipped in dry-run mode)
//!
//! Everything before step 6 is read-only apart from the fetch, so a failed
//! run can simply be repeated.

use std::path::Path;

use crate::boundary::{check_version_order, BoundaryWarning};
use crate::checks;
use crate::config::Config;
use crate::domain::{TagPattern, VersionDescriptor};
use crate::error::{ReleaseError, Result};
use crate::git::{browse_url, Repository};
use crate::metadata;
use crate::tools::{self, DraftRelease, ToolRunner};
use crate::ui;

/// Arguments for the release workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseWorkflowArgs {
    /// Version being released
    pub version: VersionDescriptor,

    /// Generate notes but do not create the release
    pub dry_run: bool,
}

/// Result of a successful release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Tag of the new release, e.g. `v0.1.0-alpha.7`
    pub tag: String,

    /// Tag the commit log starts from
    pub previous_tag: String,

    /// Commits between the previous tag and HEAD
    pub commit_count: usize,

    /// Generated release notes
    pub notes: String,

    /// The created draft, `None` in dry-run mode
    pub release: Option<DraftRelease>,

    /// Warnings shown during the run
    pub warnings: Vec<BoundaryWarning>,
}

/// Main release workflow
///
/// # Arguments
///
/// * `args` - Version and dry-run flag
/// * `config` - Release configuration
/// * `root` - Repository working tree; manifest paths are relative to it
/// * `repo` - Repository queries
/// * `runner` - Runner for the notes and publishing CLIs
pub fn run_release_workflow<R, T>(
    args: &ReleaseWorkflowArgs,
    config: &Config,
    root: &Path,
    repo: &R,
    runner: &T,
) -> Result<WorkflowResult>
where
    R: Repository + ?Sized,
    T: ToolRunner + ?Sized,
{
    let repository = &config.repository;
    let tag_pattern = TagPattern::new(&repository.tag_prefix);
    let version = &args.version;
    let tag = tag_pattern.format(&version.semver());
    let mut warnings = Vec::new();

    ui::display_status(&format!("Verifying on {} branch...", repository.branch));
    checks::check_branch(repo, &repository.branch)?;
    ui::display_success(&format!("On {}", repository.branch));

    ui::display_status("Checking working tree...");
    checks::check_working_tree(repo)?;
    ui::display_success("Working tree clean");

    ui::display_status(&format!(
        "Fetching {} and verifying HEAD matches {}/{}...",
        repository.remote, repository.remote, repository.branch
    ));
    let head = checks::check_remote_sync(repo, &repository.remote, &repository.branch)?;
    ui::display_success(&format!(
        "HEAD matches {}/{}",
        repository.remote, repository.branch
    ));

    ui::display_status("Finding last tag...");
    let previous_tag = checks::find_last_tag(repo, &repository.tag_pattern)?;
    ui::display_success(&format!("Last tag: {}", previous_tag));
    if let Some(warning) = check_version_order(&previous_tag, &tag_pattern, version) {
        ui::display_boundary_warning(&warning);
        warnings.push(warning);
    }

    for manifest in &config.manifests {
        ui::display_status(&format!("Verifying version in {}...", manifest.path));
        let found = metadata::verify_manifest(root, manifest, version)?;
        ui::display_success(&format!("{}: {} ok", manifest.path, found));
    }

    let readme = &config.readme;
    if readme.enabled {
        ui::display_status(&format!("Verifying version in {}...", readme.path));
        let repo_url = readme_repo_url(readme.repo_url.as_deref(), repo, &repository.remote)?;
        let found = metadata::verify_readme(root, readme, &repo_url, &tag)?;
        ui::display_success(&format!("{}: {} ok", readme.path, found));
    }

    let commits = repo.commits_since(&previous_tag)?;
    ui::display_status(&format!(
        "Collecting {} commits since {}...",
        commits.len(),
        previous_tag
    ));
    if commits.is_empty() {
        let warning = BoundaryWarning::NoNewCommits {
            latest_tag: previous_tag.clone(),
            current_commit_hash: head,
        };
        ui::display_boundary_warning(&warning);
        warnings.push(warning);
    } else {
        ui::display_commits(&commits);
    }
    let commit_log = commits
        .iter()
        .map(|commit| commit.oneline())
        .collect::<Vec<_>>()
        .join("\n");

    ui::display_status("Generating release notes...");
    let project = project_name(config, root);
    let notes = tools::generate_release_notes(runner, &config.notes, &project, &commit_log)?;

    let release = if args.dry_run {
        ui::display_notes(&tag, &notes);
        ui::display_status(&format!("Dry run: skipping draft release {}", tag));
        None
    } else {
        ui::display_status(&format!("Creating draft release {}...", tag));
        let release = tools::create_draft_release(runner, &config.publish, &tag, &notes)?;
        ui::display_success(&format!("Done: {}", release.output));
        Some(release)
    };

    Ok(WorkflowResult {
        tag,
        previous_tag,
        commit_count: commits.len(),
        notes,
        release,
        warnings,
    })
}

/// Configured README marker URL, or the remote's URL in browsable form
fn readme_repo_url<R: Repository + ?Sized>(
    configured: Option<&str>,
    repo: &R,
    remote: &str,
) -> Result<String> {
    if let Some(url) = configured {
        return Ok(url.to_string());
    }

    repo.remote_url(remote)?
        .map(|url| browse_url(&url))
        .ok_or_else(|| {
            ReleaseError::config(format!(
                "Remote '{}' has no URL; set readme.repo_url",
                remote
            ))
        })
}

/// Project description for the notes prompt
fn project_name(config: &Config, root: &Path) -> String {
    config
        .notes
        .project
        .clone()
        .or_else(|| {
            root.file_name()
                .map(|name| name.to_string_lossy().to_string())
        })
        .unwrap_or_else(|| "this project".to_string())
}
