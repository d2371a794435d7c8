use crate::domain::{TagPattern, VersionDescriptor};
use std::fmt;

/// Non-fatal findings reported during a release run.
///
/// None of these stop the workflow; they are printed so the operator can
/// abort by hand if something looks off.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No new commits since the latest tag
    NoNewCommits {
        latest_tag: String,
        current_commit_hash: String,
    },
    /// Tag exists but cannot be parsed as a semantic version
    UnparsableTag { tag: String, reason: String },
    /// Requested version has no semantic-version reading (e.g. `01.0.0`)
    UnparsableVersion { version: String, reason: String },
    /// The requested version does not sort after the latest tag
    VersionNotAhead { latest_tag: String, version: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewCommits {
                latest_tag,
                current_commit_hash,
            } => {
                let short_hash = if current_commit_hash.len() > 7 {
                    &current_commit_hash[..7]
                } else {
                    current_commit_hash.as_str()
                };
                write!(
                    f,
                    "No new commits since tag '{}' (current: {})",
                    latest_tag, short_hash
                )
            }
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Cannot parse tag '{}': {}", tag, reason)
            }
            BoundaryWarning::UnparsableVersion { version, reason } => {
                write!(
                    f,
                    "Cannot compare version {} with earlier tags: {}",
                    version, reason
                )
            }
            BoundaryWarning::VersionNotAhead {
                latest_tag,
                version,
            } => {
                write!(
                    f,
                    "Version {} is not newer than the latest tag '{}'",
                    version, latest_tag
                )
            }
        }
    }
}

/// Compare the release version with the latest tag
///
/// Returns a warning when the tag is not semver once its prefix is removed,
/// or when the new version does not sort strictly after it.
pub fn check_version_order(
    latest_tag: &str,
    pattern: &TagPattern,
    version: &VersionDescriptor,
) -> Option<BoundaryWarning> {
    let unparsable = |reason: String| BoundaryWarning::UnparsableTag {
        tag: latest_tag.to_string(),
        reason,
    };

    let Some(tag_version) = pattern.version_part(latest_tag) else {
        return Some(unparsable(format!(
            "missing '{}' prefix",
            pattern.prefix
        )));
    };

    let previous = match semver::Version::parse(tag_version) {
        Ok(previous) => previous,
        Err(e) => return Some(unparsable(e.to_string())),
    };

    let next = match version.to_semver() {
        Ok(next) => next,
        Err(e) => {
            return Some(BoundaryWarning::UnparsableVersion {
                version: version.semver(),
                reason: e.to_string(),
            })
        }
    };

    if next <= previous {
        Some(BoundaryWarning::VersionNotAhead {
            latest_tag: latest_tag.to_string(),
            version: version.semver(),
        })
    } else {
        None
    }
}
