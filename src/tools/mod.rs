//! External tools the workflow delegates to
//!
//! Release notes come from a text-generation CLI and the draft release is
//! created with the hosting platform's CLI. Both go through [ToolRunner] so
//! tests can script their output with [MockRunner].

pub mod mock;
pub mod notes;
pub mod publish;
pub mod system;

pub use mock::{Invocation, MockRunner};
pub use notes::generate_release_notes;
pub use publish::{create_draft_release, DraftRelease};
pub use system::SystemRunner;

use crate::error::Result;

/// Runs an external program to completion
pub trait ToolRunner {
    /// Run `program args...`, feeding `stdin` if given
    ///
    /// Returns trimmed standard output. A non-zero exit is an error that
    /// carries the program's standard error.
    fn run(&self, program: &str, args: &[String], stdin: Option<&str>) -> Result<String>;
}

/// `program arg1 arg2`, for messages
pub fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        assert_eq!(command_line("gh", &[]), "gh");
        assert_eq!(
            command_line("gh", &["release".to_string(), "create".to_string()]),
            "gh release create"
        );
    }
}
