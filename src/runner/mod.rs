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

//! Runner module for external processes.
//!
//! This module provides functionality to:
//! - Run a composed command to completion and capture its output
//! - Hold the process working directory for the duration of a build

mod process;
mod workdir;

pub use process::{resolve_program, SystemRunner};
pub use workdir::WorkingDirGuard;

use std::path::Path;

use crate::compose::ComposedCommand;
use crate::error::LaunchError;

/// Outcome of one finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    /// `true` iff the exit status was zero.
    pub succeeded: bool,
    /// Exit code, if the platform reported one.
    pub code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl ProcessResult {
    /// A result with exit code 0.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A result with a non-zero exit code.
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Executes external commands synchronously.
pub trait ProcessRunner {
    /// Run `command` in `working_dir` and block until it exits.
    ///
    /// A non-zero exit status is a normal result, not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`LaunchError`] only if the process cannot be started.
    fn run(&self, command: &ComposedCommand, working_dir: &Path)
        -> Result<ProcessResult, LaunchError>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(
        &self,
        command: &ComposedCommand,
        working_dir: &Path,
    ) -> Result<ProcessResult, LaunchError> {
        (**self).run(command, working_dir)
    }
}
