use crate::config::NotesConfig;
use crate::error::Result;
use crate::tools::ToolRunner;

/// Instruction handed to the text-generation tool ahead of the commit log
pub fn notes_prompt(project: &str) -> String {
    format!(
        "Generate concise release notes for {}. \
         Group by: Features, Fixes, Other. Be brief. Input is git commits:",
        project
    )
}

/// Summarize a one-line-per-commit log into release notes
///
/// The log is piped to the tool's standard input; an empty log is passed
/// through as-is. The tool's output is returned verbatim (trimmed).
pub fn generate_release_notes<T: ToolRunner + ?Sized>(
    runner: &T,
    config: &NotesConfig,
    project: &str,
    commit_log: &str,
) -> Result<String> {
    let mut args = config.args.clone();
    args.push(notes_prompt(project));

    runner.run(&config.command, &args, Some(commit_log))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::MockRunner;

    #[test]
    fn test_prompt_names_project_and_groups() {
        let prompt = notes_prompt("loq (a file line limit enforcer)");
        assert!(prompt.starts_with(
            "Generate concise release notes for loq (a file line limit enforcer)."
        ));
        assert!(prompt.contains("Group by: Features, Fixes, Other."));
        assert!(prompt.ends_with("Input is git commits:"));
    }

    #[test]
    fn test_invokes_configured_command_with_log_on_stdin() {
        let mut runner = MockRunner::new();
        runner.respond("claude", "## Features\n- one\n");

        let notes = generate_release_notes(
            &runner,
            &NotesConfig::default(),
            "demo",
            "abc1234 feat: one",
        )
        .unwrap();
        assert_eq!(notes, "## Features\n- one");

        let calls = runner.invocations();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "claude");
        assert_eq!(calls[0].args[0], "--print");
        assert_eq!(calls[0].args[1], notes_prompt("demo"));
        assert_eq!(calls[0].stdin.as_deref(), Some("abc1234 feat: one"));
    }

    #[test]
    fn test_empty_log_still_runs() {
        let runner = MockRunner::new();
        generate_release_notes(&runner, &NotesConfig::default(), "demo", "").unwrap();
        assert_eq!(runner.invocations()[0].stdin.as_deref(), Some(""));
    }

    #[test]
    fn test_failure_propagates() {
        let mut runner = MockRunner::new();
        runner.fail("claude", 1, "rate limited");
        let err =
            generate_release_notes(&runner, &NotesConfig::default(), "demo", "x").unwrap_err();
        assert!(err.to_string().contains("rate limited"));
    }
}
