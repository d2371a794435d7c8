//! Human-readable progress output.
//!
//! Progress goes to stdout, errors and warnings to stderr.

use crate::boundary::BoundaryWarning;
use crate::git::CommitInfo;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Show up to 10 commits going into the release, newest first.
pub fn display_commits(commits: &[CommitInfo]) {
    for commit in commits.iter().take(10) {
        let summary: String = commit.summary.chars().take(72).collect();
        println!("  {} {}", style(&commit.hash).dim(), summary);
    }

    if commits.len() > 10 {
        println!("  ... and {} more commits", commits.len() - 10);
    }
}

/// Print generated release notes under a heading.
pub fn display_notes(tag: &str, notes: &str) {
    println!("\n{}", style(format!("Release notes for {}", tag)).bold());
    if notes.is_empty() {
        println!("  {}", style("(empty)").dim());
    } else {
        println!("{}\n", notes);
    }
}

/// Usage text for a bad command line.
pub fn display_usage(program: &str) {
    eprintln!("Usage: {} <version>", program);
    eprintln!("Example: {} 0.1.0a7", program);
}
