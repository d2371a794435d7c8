//! Version consistency across project metadata files
//!
//! - [section]: `version` lookup scoped to one TOML table
//! - [readme]: pinned `rev:` lookup in the README usage snippet
//!
//! The `verify_*` functions compare what a file records against the
//! version being released and fail with both values on any difference.

pub mod readme;
pub mod section;

pub use readme::find_pinned_rev;
pub use section::find_version_in_section;

use crate::config::{ManifestCheck, ReadmeCheck, VersionFormat};
use crate::domain::VersionDescriptor;
use crate::error::{ReleaseError, Result};
use std::fs;
use std::path::Path;

/// Render `version` the way a manifest of the given format records it
pub fn expected_version(format: VersionFormat, version: &VersionDescriptor) -> String {
    match format {
        VersionFormat::Semver => version.semver(),
        VersionFormat::Pep440 => version.pep440().to_string(),
    }
}

fn read(root: &Path, relative: &str) -> Result<String> {
    let path = root.join(relative);
    fs::read_to_string(&path).map_err(|e| ReleaseError::read(path, e))
}

/// Check the `version` under `[check.section]` of a TOML manifest
///
/// Returns the matching version on success.
pub fn verify_manifest(
    root: &Path,
    check: &ManifestCheck,
    version: &VersionDescriptor,
) -> Result<String> {
    let content = read(root, &check.path)?;
    let expected = expected_version(check.format, version);
    let found = find_version_in_section(&content, &check.section);

    match found {
        Some(found) if found == expected => Ok(found),
        found => Err(ReleaseError::mismatch(&check.path, found, expected)),
    }
}

/// Check the README's pinned revision for `repo_url` equals `expected_tag`
///
/// Returns the matching revision on success.
pub fn verify_readme(
    root: &Path,
    check: &ReadmeCheck,
    repo_url: &str,
    expected_tag: &str,
) -> Result<String> {
    let content = read(root, &check.path)?;
    let found = find_pinned_rev(&content, repo_url, check.lookahead);

    match found {
        Some(found) if found == expected_tag => Ok(found),
        found => Err(ReleaseError::mismatch(&check.path, found, expected_tag)),
    }
}
