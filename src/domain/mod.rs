//! Domain logic - pure version and tag rules independent of git and files

pub mod prerelease;
pub mod tag;
pub mod version;

pub use prerelease::{PreRelease, PreReleaseKind};
pub use tag::{glob_matches, TagPattern};
pub use version::VersionDescriptor;
