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

//! Where captured process output ends up.

use std::fmt;

use crate::compose::ComposedCommand;
use crate::error::BuildError;
use crate::runner::ProcessResult;

/// A process-running stage of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Bootstrap,
    Lint,
    Compile,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::Bootstrap => "bootstrap",
            Step::Lint => "lint",
            Step::Compile => "compile",
        })
    }
}

/// Receives the progress and captured output of a build.
pub trait Reporter {
    /// A step is about to spawn `command`.
    fn started(&mut self, step: Step, command: &ComposedCommand);

    /// A step's process exited.
    fn finished(&mut self, step: Step, result: &ProcessResult);

    /// Something worth telling the user that does not fail the build.
    fn warning(&mut self, message: &str);

    /// The build was aborted.
    fn error(&mut self, error: &BuildError);
}

/// Prints to the terminal.
///
/// Captured standard output goes to stdout. Captured standard error is
/// printed verbatim to stderr whenever a step fails, and always for lint.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Reporter for ConsoleReporter {
    fn started(&mut self, step: Step, command: &ComposedCommand) {
        if self.verbose {
            println!("[{}] {}", step, command);
        }
    }

    fn finished(&mut self, step: Step, result: &ProcessResult) {
        // The bootstrap's stdout is an environment dump.
        if step != Step::Bootstrap && !result.stdout.is_empty() {
            print!("{}", result.stdout);
        }

        if !result.succeeded || step == Step::Lint {
            eprint!("{}", result.stderr);
        }

        if !result.succeeded {
            let code = result
                .code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            match step {
                Step::Lint => eprintln!("Warning: lint reported findings (exit {})", code),
                _ => eprintln!("Error: {} step failed (exit {})", step, code),
            }
        } else if self.verbose {
            println!("[{}] ok", step);
        }
    }

    fn warning(&mut self, message: &str) {
        eprintln!("Warning: {}", message);
    }

    fn error(&mut self, error: &BuildError) {
        eprintln!("Error: {}", error);
    }
}

/// Keeps every event in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    pub started: Vec<(Step, ComposedCommand)>,
    pub finished: Vec<(Step, ProcessResult)>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl Reporter for RecordingReporter {
    fn started(&mut self, step: Step, command: &ComposedCommand) {
        self.started.push((step, command.clone()));
    }

    fn finished(&mut self, step: Step, result: &ProcessResult) {
        self.finished.push((step, result.clone()));
    }

    fn warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn error(&mut self, error: &BuildError) {
        self.errors.push(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;

    #[test]
    fn test_step_names() {
        assert_eq!(Step::Bootstrap.to_string(), "bootstrap");
        assert_eq!(Step::Lint.to_string(), "lint");
        assert_eq!(Step::Compile.to_string(), "compile");
    }

    #[test]
    fn test_recording_reporter() {
        let mut reporter = RecordingReporter::default();
        let command = ComposedCommand::new("cl", ["a.cpp"], "build");
        reporter.started(Step::Compile, &command);
        reporter.finished(Step::Compile, &ProcessResult::failure(2, "a.cpp(1): error"));
        reporter.warning("lint skipped");
        reporter.error(&ConfigurationError::EmptyOutputName.into());

        assert_eq!(reporter.started[0].1, command);
        assert_eq!(reporter.finished[0].1.stderr, "a.cpp(1): error");
        assert_eq!(reporter.warnings, ["lint skipped"]);
        assert_eq!(reporter.errors.len(), 1);
    }
}
