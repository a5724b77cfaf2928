//! Child-process runner for the bootstrap steps.
//!
//! Spawns a command with an explicit working directory, waits for it to exit
//! and captures stdout/stderr. There is no timeout and no retry; callers decide
//! whether a failure aborts or is reported as a warning.

use crate::manager::PackageManager;
use miette::Diagnostic;
use std::{
    path::Path,
    process::{Command, Output},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ProcessError {
    #[error("failed to spawn '{command}'")]
    #[diagnostic(
        code(sprout::process::spawn),
        help("Is the program installed and on PATH?")
    )]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with status {code}: {stderr}")]
    #[diagnostic(code(sprout::process::exit_status))]
    Failed {
        command: String,
        code: i32,
        stderr: String,
    },
}

/// Captured output of a completed command (trimmed).
#[derive(Debug, Clone)]
pub struct CmdOutput {
    pub stdout: String,
    pub stderr: String,
}
impl CmdOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Runs `program` with `args` in `cwd`, blocking until it exits.
pub fn run(cwd: &Path, program: &str, args: &[&str]) -> Result<CmdOutput, ProcessError> {
    let command = format!("{} {}", program, args.join(" "));

    log::debug!("running '{}' in {}", command, cwd.display());

    let output = Command::new(program)
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|error| ProcessError::Spawn {
            command: command.clone(),
            source: error,
        })?;

    let captured = CmdOutput::from_output(&output);

    if output.status.success() {
        Ok(captured)
    } else {
        let stderr = if captured.stderr.is_empty() {
            captured.stdout
        } else {
            captured.stderr
        };

        Err(ProcessError::Failed {
            command,
            code: output.status.code().unwrap_or(-1),
            stderr,
        })
    }
}

/// Initializes a version-control repository in the project directory.
pub fn git_init(project: &Path) -> Result<CmdOutput, ProcessError> {
    run(project, "git", &["init"])
}

/// Installs the project's JS dependencies with the selected manager.
pub fn install(manager: PackageManager, cwd: &Path) -> Result<CmdOutput, ProcessError> {
    run(cwd, manager.program(), &["install"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_captures_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let output = run(dir.path(), "sh", &["-c", "printf hello"]).unwrap();
        assert_eq!(output.stdout, "hello");
    }

    #[test]
    fn run_reports_the_exit_code_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(dir.path(), "sh", &["-c", "echo boom >&2; exit 3"]).unwrap_err();
        match err {
            ProcessError::Failed { code, stderr, .. } => {
                assert_eq!(code, 3);
                assert_eq!(stderr, "boom");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn run_reports_spawn_failures() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(dir.path(), "definitely-not-a-real-command", &[]).unwrap_err();
        assert!(matches!(err, ProcessError::Spawn { .. }));
    }
}
