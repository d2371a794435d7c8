use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;

use release_draft::cli::{run_release_workflow, ReleaseWorkflowArgs};
use release_draft::config;
use release_draft::domain::VersionDescriptor;
use release_draft::git::Git2Repository;
use release_draft::tools::SystemRunner;
use release_draft::ui;

const BIN_NAME: &str = "release-draft";

#[derive(clap::Parser)]
#[command(
    name = "release-draft",
    version,
    about = "Verify a release and create a draft GitHub release with generated notes"
)]
struct Args {
    /// Version to release, PEP 440 style (e.g. 0.1.0a7, 1.0.0, 2.0.0rc1)
    #[arg(value_name = "VERSION")]
    release_version: String,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Run every check and generate notes without creating the release")]
    dry_run: bool,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                // Help and --version go to stdout and exit 0
                let _ = e.print();
                return ExitCode::SUCCESS;
            }
            _ => {
                let _ = e.print();
                ui::display_usage(BIN_NAME);
                return ExitCode::FAILURE;
            }
        },
    };

    let version = match VersionDescriptor::parse(&args.release_version) {
        Ok(version) => version,
        Err(e) => {
            ui::display_error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    match run(args, version) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args, version: VersionDescriptor) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    let repo = Git2Repository::open(".").context("Not in a git repository")?;
    let root = repo.workdir()?;
    let runner = SystemRunner::new(&root);

    let workflow_args = ReleaseWorkflowArgs {
        version,
        dry_run: args.dry_run,
    };

    let result = run_release_workflow(&workflow_args, &config, &root, &repo, &runner)?;

    if let Some(release) = &result.release {
        ui::display_success(&format!(
            "Draft release {} created from {} commits since {}",
            release.tag, result.commit_count, result.previous_tag
        ));
    }

    Ok(())
}
