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

//! Toolchain environment bootstrap.
//!
//! MSVC only works after `vcvarsall.bat <arch>` has populated `PATH`,
//! `INCLUDE` and `LIB`. The bootstrap command runs the script and then dumps
//! the resulting environment with `set`; [`parse_environment`] turns that
//! dump into variables for the compile process.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::compose::ComposedCommand;
use crate::config::Architecture;

/// Placeholder replaced with the architecture name.
pub const ARCH_PLACEHOLDER: &str = "{arch}";

/// The default bootstrap on Windows.
pub fn default_bootstrap() -> Vec<String> {
    if cfg!(windows) {
        [
            "cmd",
            "/d",
            "/c",
            "call",
            "vcvarsall.bat",
            ARCH_PLACEHOLDER,
            ">nul",
            "2>&1",
            "&&",
            "set",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    } else {
        Vec::new()
    }
}

/// Builds the bootstrap command for an architecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bootstrap {
    template: Vec<String>,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new(default_bootstrap())
    }
}

impl Bootstrap {
    /// A bootstrap from a token template. An empty template disables it.
    pub fn new(template: Vec<String>) -> Self {
        Self { template }
    }

    /// No bootstrap; the compile step inherits this process's environment.
    pub fn disabled() -> Self {
        Self::new(Vec::new())
    }

    pub fn is_enabled(&self) -> bool {
        !self.template.is_empty()
    }

    /// The command for `architecture`, or `None` if disabled.
    pub fn command(
        &self,
        architecture: Architecture,
        working_dir: impl Into<PathBuf>,
    ) -> Option<ComposedCommand> {
        let tokens: Vec<String> = self
            .template
            .iter()
            .map(|t| t.replace(ARCH_PLACEHOLDER, architecture.as_str()))
            .collect();
        ComposedCommand::from_tokens(&tokens, working_dir)
    }
}

/// Parse `KEY=VALUE` lines of an environment dump.
///
/// Lines without `=` are skipped, as are cmd.exe's hidden per-drive entries
/// (`=C:=C:\...`), whose name starts with `=`.
pub fn parse_environment(dump: &str) -> BTreeMap<String, String> {
    dump.lines()
        .filter_map(|line| {
            let line = line.trim_end_matches('\r');
            let (key, value) = line.split_once('=')?;
            if key.is_empty() || key.chars().any(char::is_whitespace) {
                return None;
            }
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}
