// hmbuild - A build orchestrator for the Handmade Hero Win32 platform layer
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Spawning processes with [`std::process::Command`].

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use super::{ProcessResult, ProcessRunner};
use crate::compose::ComposedCommand;
use crate::error::LaunchError;

/// Resolve the program of `command` to a binary path.
///
/// Searches the `PATH` the child will see: the command's own `PATH` if its
/// environment overlay sets one, otherwise this process's `PATH`. Relative
/// paths are resolved against `working_dir`.
///
/// # Example
///
/// ```no_run
/// use hmbuild::compose::ComposedCommand;
/// use hmbuild::runner::resolve_program;
/// use std::path::Path;
///
/// let command = ComposedCommand::new("cppcheck", ["src"], ".");
/// match resolve_program(&command, Path::new(".")) {
///     Ok(path) => println!("Found cppcheck: {}", path.display()),
///     Err(e) => println!("{}", e),
/// }
/// ```
pub fn resolve_program(
    command: &ComposedCommand,
    working_dir: &Path,
) -> Result<PathBuf, LaunchError> {
    if command.program().is_empty() {
        return Err(LaunchError::EmptyCommand);
    }

    // cmd.exe reports the variable as `Path`.
    let search_path = command
        .env()
        .iter()
        .find(|(key, _)| {
            if cfg!(windows) {
                key.eq_ignore_ascii_case("PATH")
            } else {
                key.as_str() == "PATH"
            }
        })
        .map(|(_, value)| OsString::from(value))
        .or_else(|| env::var_os("PATH"));

    which::which_in(command.program(), search_path, working_dir).map_err(|_| {
        LaunchError::ProgramNotFound {
            program: command.program().to_string(),
        }
    })
}

/// Runs commands as child processes of this process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(
        &self,
        command: &ComposedCommand,
        working_dir: &Path,
    ) -> Result<ProcessResult, LaunchError> {
        // Checked up front so a missing directory is not reported as a
        // missing program.
        if !working_dir.is_dir() {
            return Err(LaunchError::WorkingDirectory {
                path: working_dir.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "not an existing directory",
                ),
            });
        }

        let program = resolve_program(command, working_dir)?;

        debug!(
            program = %program.display(),
            args = command.args().len(),
            working_dir = %working_dir.display(),
            "spawning process"
        );

        let output = Command::new(&program)
            .args(command.args())
            .envs(command.env())
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| LaunchError::Spawn {
                program: command.program().to_string(),
                source: e,
            })?;

        let result = ProcessResult {
            succeeded: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        debug!(
            program = command.program(),
            code = ?result.code,
            succeeded = result.succeeded,
            "process exited"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn run(command: ComposedCommand) -> Result<ProcessResult, LaunchError> {
        let dir = std::env::temp_dir();
        SystemRunner::new().run(&command, &dir)
    }

    #[test]
    fn test_missing_program_is_launch_error() {
        let command = ComposedCommand::new("hmbuild-no-such-program", ["x"], ".");
        assert!(matches!(
            run(command),
            Err(LaunchError::ProgramNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_working_dir_is_launch_error() {
        let command = ComposedCommand::new("hmbuild-no-such-program", Vec::<String>::new(), ".");
        let missing = std::env::temp_dir().join("hmbuild-missing-dir-for-test");
        let result = SystemRunner::new().run(&command, &missing);
        assert!(matches!(result, Err(LaunchError::WorkingDirectory { .. })));
    }

    #[test]
    fn test_empty_program() {
        let command = ComposedCommand::new("", Vec::<String>::new(), ".");
        assert!(matches!(run(command), Err(LaunchError::EmptyCommand)));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_uses_overlay_path() {
        let command = ComposedCommand::new("sh", Vec::<String>::new(), ".");
        assert!(resolve_program(&command, Path::new(".")).is_ok());

        let mut env = BTreeMap::new();
        env.insert("PATH".to_string(), "/hmbuild/nowhere".to_string());
        let command = command.with_env(env);
        assert!(matches!(
            resolve_program(&command, Path::new(".")),
            Err(LaunchError::ProgramNotFound { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_output_and_status() {
        let command = ComposedCommand::new("sh", ["-c", "echo out; echo err >&2; exit 3"], ".");
        let result = run(command).unwrap();
        assert!(!result.succeeded);
        assert_eq!(result.code, Some(3));
        assert_eq!(result.stdout, "out\n");
        assert_eq!(result.stderr, "err\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_arguments_are_not_shell_split() {
        let command = ComposedCommand::new("printf", ["%s|", "a b", "c;d"], ".");
        let result = run(command).unwrap();
        assert!(result.succeeded);
        assert_eq!(result.stdout, "a b|c;d|");
    }

    #[cfg(unix)]
    #[test]
    fn test_environment_overlay() {
        let mut env = BTreeMap::new();
        env.insert("HMBUILD_TEST_VALUE".to_string(), "42".to_string());
        let command =
            ComposedCommand::new("sh", ["-c", "echo $HMBUILD_TEST_VALUE"], ".").with_env(env);
        let result = run(command).unwrap();
        assert_eq!(result.stdout.trim(), "42");
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_in_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        let command = ComposedCommand::new("pwd", Vec::<String>::new(), ".");
        let result = SystemRunner::new().run(&command, dir.path()).unwrap();
        let reported = std::path::PathBuf::from(result.stdout.trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }
}
