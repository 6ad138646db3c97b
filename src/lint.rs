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

//! Advisory static analysis over the project tree.

use std::path::PathBuf;

use crate::compose::ComposedCommand;
use crate::runner::ProcessResult;

/// Default lint driver invocation, run from the project root.
pub const DEFAULT_LINT_COMMAND: &[&str] = &[
    "cppcheck",
    "--quiet",
    "--enable=warning,style,performance",
    "--error-exitcode=1",
    "src",
];

/// The lint step of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintPass {
    command: Vec<String>,
}

impl Default for LintPass {
    fn default() -> Self {
        Self::new(DEFAULT_LINT_COMMAND.iter().map(|s| s.to_string()).collect())
    }
}

impl LintPass {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    /// The lint command rooted at `project_root`, or `None` if the
    /// configured command is empty.
    pub fn command(&self, project_root: impl Into<PathBuf>) -> Option<ComposedCommand> {
        ComposedCommand::from_tokens(&self.command, project_root)
    }
}

/// What happened in the lint step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintOutcome {
    /// Lint ran and found nothing.
    Clean(ProcessResult),
    /// Lint exited non-zero. Reported, never fatal.
    Findings(ProcessResult),
    /// Lint did not run; the reason is kept for the report.
    Skipped(String),
}

impl LintOutcome {
    /// Classify a finished lint process.
    pub fn from_result(result: ProcessResult) -> Self {
        if result.succeeded {
            LintOutcome::Clean(result)
        } else {
            LintOutcome::Findings(result)
        }
    }

    pub fn has_findings(&self) -> bool {
        matches!(self, LintOutcome::Findings(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_runs_over_src() {
        let command = LintPass::default().command("/project").unwrap();
        assert_eq!(command.program(), "cppcheck");
        assert_eq!(command.args().last().map(String::as_str), Some("src"));
        assert_eq!(command.working_dir(), std::path::Path::new("/project"));
    }

    #[test]
    fn test_empty_command() {
        let lint = LintPass::new(Vec::new());
        assert!(lint.command(".").is_none());
    }

    #[test]
    fn test_classification() {
        assert!(!LintOutcome::from_result(ProcessResult::success("")).has_findings());
        assert!(LintOutcome::from_result(ProcessResult::failure(1, "style")).has_findings());
        assert!(!LintOutcome::Skipped("disabled".to_string()).has_findings());
    }
}
