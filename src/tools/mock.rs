use crate::error::{ReleaseError, Result};
use crate::tools::{command_line, ToolRunner};
use std::cell::RefCell;
use std::collections::HashMap;

/// One recorded call to [MockRunner]
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<String>,
}

enum Scripted {
    Output(String),
    Failure { code: i32, stderr: String },
}

/// Tool runner that returns scripted output and records every call
///
/// Programs without a script succeed with empty output.
#[derive(Default)]
pub struct MockRunner {
    scripts: HashMap<String, Scripted>,
    invocations: RefCell<Vec<Invocation>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `program` succeed with `stdout`
    pub fn respond(&mut self, program: impl Into<String>, stdout: impl Into<String>) {
        self.scripts
            .insert(program.into(), Scripted::Output(stdout.into()));
    }

    /// Make `program` exit with `code` and `stderr`
    pub fn fail(&mut self, program: impl Into<String>, code: i32, stderr: impl Into<String>) {
        self.scripts.insert(
            program.into(),
            Scripted::Failure {
                code,
                stderr: stderr.into(),
            },
        );
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    /// Calls made to one program
    pub fn invocations_of(&self, program: &str) -> Vec<Invocation> {
        self.invocations
            .borrow()
            .iter()
            .filter(|call| call.program == program)
            .cloned()
            .collect()
    }
}

impl ToolRunner for MockRunner {
    fn run(&self, program: &str, args: &[String], stdin: Option<&str>) -> Result<String> {
        self.invocations.borrow_mut().push(Invocation {
            program: program.to_string(),
            args: args.to_vec(),
            stdin: stdin.map(str::to_string),
        });

        match self.scripts.get(program) {
            Some(Scripted::Output(stdout)) => Ok(stdout.trim().to_string()),
            Some(Scripted::Failure { code, stderr }) => Err(ReleaseError::Tool {
                command: command_line(program, args),
                code: *code,
                stderr: stderr.clone(),
            }),
            None => Ok(String::new()),
        }
    }
}
