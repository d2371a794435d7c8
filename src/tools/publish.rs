use crate::config::PublishConfig;
use crate::error::{ReleaseError, Result};
use crate::tools::ToolRunner;
use std::io::Write;
use std::path::PathBuf;

/// Outcome of creating a draft release
#[derive(Debug, Clone, PartialEq)]
pub struct DraftRelease {
    pub tag: String,
    /// Notes file handed to the hosting CLI; left in the temp directory
    pub notes_file: PathBuf,
    /// Whatever the hosting CLI printed (usually the release URL)
    pub output: String,
}

/// Write `notes` to a temp file and create an unpublished release for `tag`
///
/// The release title is the tag itself. Nothing is rolled back on failure:
/// no earlier step changed the repository, so rerunning is safe.
pub fn create_draft_release<T: ToolRunner + ?Sized>(
    runner: &T,
    config: &PublishConfig,
    tag: &str,
    notes: &str,
) -> Result<DraftRelease> {
    let mut file = tempfile::Builder::new()
        .prefix("release-notes-")
        .suffix(".md")
        .tempfile()?;
    file.write_all(notes.as_bytes())?;
    file.flush()?;

    let notes_file = file
        .into_temp_path()
        .keep()
        .map_err(|e| ReleaseError::Io(e.error))?;

    let args = vec![
        "release".to_string(),
        "create".to_string(),
        tag.to_string(),
        "--draft".to_string(),
        "--title".to_string(),
        tag.to_string(),
        "--notes-file".to_string(),
        notes_file.display().to_string(),
    ];

    let output = runner.run(&config.command, &args, None)?;

    Ok(DraftRelease {
        tag: tag.to_string(),
        notes_file,
        output,
    })
}
