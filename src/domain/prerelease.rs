//! Pre-release markers shared by the PEP 440 and semver renderings
//!
//! PEP 440 spells the markers `a`, `b`, `rc` with no separator before the
//! number (`1.0.0a1`); semver spells them out after a hyphen with a dot before
//! the number (`1.0.0-alpha.1`).

use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// Pre-release kind (alpha, beta, rc)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreReleaseKind {
    Alpha,
    Beta,
    ReleaseCandidate,
}

impl PreReleaseKind {
    /// PEP 440 marker: `a`, `b` or `rc`
    pub fn pep440_marker(&self) -> &'static str {
        match self {
            PreReleaseKind::Alpha => "a",
            PreReleaseKind::Beta => "b",
            PreReleaseKind::ReleaseCandidate => "rc",
        }
    }

    /// Semver identifier: `alpha`, `beta` or `rc`
    pub fn semver_identifier(&self) -> &'static str {
        match self {
            PreReleaseKind::Alpha => "alpha",
            PreReleaseKind::Beta => "beta",
            PreReleaseKind::ReleaseCandidate => "rc",
        }
    }
}

impl FromStr for PreReleaseKind {
    type Err = ReleaseError;

    /// Only the PEP 440 markers are accepted, case-sensitively.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "a" => Ok(PreReleaseKind::Alpha),
            "b" => Ok(PreReleaseKind::Beta),
            "rc" => Ok(PreReleaseKind::ReleaseCandidate),
            other => Err(ReleaseError::usage(format!(
                "Invalid pre-release marker: '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for PreReleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.semver_identifier())
    }
}

/// Pre-release kind together with its mandatory number
///
/// A PEP 440 pre-release always carries a number, so there is no
/// "kind without number" state to represent. The number is kept as decimal
/// digits without leading zeros, so any length is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreRelease {
    pub kind: PreReleaseKind,
    number: String,
}

impl PreRelease {
    /// `digits` must be ASCII decimal digits; leading zeros are dropped
    pub fn new(kind: PreReleaseKind, digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        let number = if trimmed.is_empty() { "0" } else { trimmed };
        PreRelease {
            kind,
            number: number.to_string(),
        }
    }

    /// The pre-release number, e.g. `7`
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Render as a PEP 440 suffix, e.g. `rc2`
    pub fn pep440(&self) -> String {
        format!("{}{}", self.kind.pep440_marker(), self.number)
    }
}

impl fmt::Display for PreRelease {
    /// Semver rendering, e.g. `alpha.7`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind.semver_identifier(), self.number)
    }
}
