use crate::error::{ReleaseError, Result};
use crate::tools::{command_line, ToolRunner};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

/// Runs tools as child processes in the repository root
pub struct SystemRunner {
    cwd: PathBuf,
}

impl SystemRunner {
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        SystemRunner {
            cwd: cwd.as_ref().to_path_buf(),
        }
    }
}

impl ToolRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String], stdin: Option<&str>) -> Result<String> {
        let command = command_line(program, args);

        let mut child = Command::new(program)
            .args(args)
            .current_dir(&self.cwd)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ReleaseError::ToolStart {
                command: command.clone(),
                source,
            })?;

        // Feed stdin from a separate thread so a chatty child cannot block on a full stdout pipe
        let writer = match (stdin, child.stdin.take()) {
            (Some(input), Some(mut pipe)) => {
                let input = input.to_string();
                Some(thread::spawn(move || pipe.write_all(input.as_bytes())))
            }
            _ => None,
        };

        let output = child.wait_with_output()?;

        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                // The child may exit without reading all of its input
                Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                Ok(Err(e)) => return Err(ReleaseError::Io(e)),
                Err(_) => {
                    return Err(ReleaseError::Io(std::io::Error::other(
                        "stdin writer thread panicked",
                    )))
                }
            }
        }

        if !output.status.success() {
            return Err(ReleaseError::Tool {
                command,
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
