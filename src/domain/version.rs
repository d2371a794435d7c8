use crate::domain::prerelease::{PreRelease, PreReleaseKind};
use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

const INVALID_VERSION: &str =
    "Invalid version format. Expected PEP 440 (e.g., 0.1.0a7, 1.0.0, 2.0.0rc1)";

fn prerelease_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+\.\d+\.\d+)(a|b|rc)(\d+)$").expect("valid regex"))
}

fn stable_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+\.\d+\.\d+)$").expect("valid regex"))
}

/// Release version as given on the command line
///
/// Holds the `X.Y.Z` base and an optional pre-release. Renders both as PEP 440
/// (`0.1.0a7`, what Python packaging records) and as semver (`0.1.0-alpha.7`,
/// what Cargo manifests and tags record).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDescriptor {
    source: String,
    base: String,
    prerelease: Option<PreRelease>,
}

impl VersionDescriptor {
    /// Parse a PEP 440 style version: `X.Y.Z` or `X.Y.Z{a|b|rc}N`
    ///
    /// A pre-release marker without digits (`1.0.0a`) is rejected, as is
    /// anything that is not exactly three dot-separated numbers.
    pub fn parse(input: &str) -> Result<Self> {
        if let Some(caps) = prerelease_re().captures(input) {
            let kind: PreReleaseKind = caps[2].parse()?;
            return Ok(VersionDescriptor {
                source: input.to_string(),
                base: caps[1].to_string(),
                prerelease: Some(PreRelease::new(kind, &caps[3])),
            });
        }

        if let Some(caps) = stable_re().captures(input) {
            return Ok(VersionDescriptor {
                source: input.to_string(),
                base: caps[1].to_string(),
                prerelease: None,
            });
        }

        Err(ReleaseError::usage(INVALID_VERSION))
    }

    /// The `X.Y.Z` part
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn prerelease(&self) -> Option<&PreRelease> {
        self.prerelease.as_ref()
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// PEP 440 form, exactly as supplied
    pub fn pep440(&self) -> &str {
        &self.source
    }

    /// Semver form: stable versions pass through, pre-releases become
    /// `base-{alpha|beta|rc}.N`
    pub fn semver(&self) -> String {
        match &self.prerelease {
            Some(pre) => format!("{}-{}", self.base, pre),
            None => self.base.clone(),
        }
    }

    /// Parsed semver value, used for ordering against earlier tags
    ///
    /// Fails for bases the PEP 440 grammar accepts but semver does not,
    /// such as `01.0.0`.
    pub fn to_semver(&self) -> std::result::Result<semver::Version, semver::Error> {
        semver::Version::parse(&self.semver())
    }
}

impl fmt::Display for VersionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
