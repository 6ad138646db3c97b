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

//! Turning a [`BuildConfiguration`] into a toolchain invocation.
//!
//! Composition is pure. The same configuration and registry always produce
//! the same tokens, in this order:
//!
//! ```text
//! <driver> <defines> <behavior> <warnings> <optimization> <map flag><output>.map
//!          <fixed sources> <additional files> <fixed libraries> <additional libraries>
//!          <linker separator> <linker flags>
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::BuildConfiguration;
use crate::error::ConfigurationError;
use crate::flags::FlagSetRegistry;

/// Default compiler/linker driver.
pub const DEFAULT_DRIVER: &str = "cl";

/// Default prefix of the map file argument.
pub const DEFAULT_MAP_FILE_FLAG: &str = "-Fm";

/// Sources always compiled, relative to the build directory.
pub const DEFAULT_SOURCES: &[&str] = &[
    "../src/win32/win32-handmade-hero.cpp",
    "../src/handmade-hero/handmade-hero.cpp",
    "../src/win32/win32-input.cpp",
    "../src/win32/win32-file-io.cpp",
];

/// Libraries always linked.
pub const DEFAULT_LIBRARIES: &[&str] = &["user32.lib", "gdi32.lib", "xinput.lib"];

/// A fully resolved command, ready to be spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedCommand {
    program: String,
    args: Vec<String>,
    working_dir: PathBuf,
    env: BTreeMap<String, String>,
}

impl ComposedCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I, working_dir: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: working_dir.into(),
            env: BTreeMap::new(),
        }
    }

    /// Build a command from a token list whose first token is the program.
    ///
    /// Returns `None` for an empty list.
    pub fn from_tokens(tokens: &[String], working_dir: impl Into<PathBuf>) -> Option<Self> {
        let (program, args) = tokens.split_first()?;
        Some(Self::new(program.clone(), args.iter().cloned(), working_dir))
    }

    /// The same command with extra environment variables for the child.
    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env.extend(env);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Program followed by all arguments.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str))
    }
}

impl fmt::Display for ComposedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<&str> = self.tokens().collect();
        f.write_str(&tokens.join(" "))
    }
}

/// Combines the flag registry with the fixed project inputs.
#[derive(Debug, Clone)]
pub struct CommandComposer {
    registry: FlagSetRegistry,
    driver: String,
    map_file_flag: String,
    sources: Vec<String>,
    libraries: Vec<String>,
    working_dir: PathBuf,
}

impl CommandComposer {
    /// A composer for the built-in toolchain, sources and libraries.
    pub fn new(registry: FlagSetRegistry, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            driver: DEFAULT_DRIVER.to_string(),
            map_file_flag: DEFAULT_MAP_FILE_FLAG.to_string(),
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            libraries: DEFAULT_LIBRARIES.iter().map(|s| s.to_string()).collect(),
            working_dir: working_dir.into(),
        }
    }

    pub fn with_driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = driver.into();
        self
    }

    pub fn with_map_file_flag(mut self, flag: impl Into<String>) -> Self {
        self.map_file_flag = flag.into();
        self
    }

    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_libraries(mut self, libraries: Vec<String>) -> Self {
        self.libraries = libraries;
        self
    }

    pub fn registry(&self) -> &FlagSetRegistry {
        &self.registry
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Compose the compile command for a build request.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the driver or the output name is
    /// empty, or if the registry has no usable flag set for the request.
    pub fn compose(
        &self,
        config: &BuildConfiguration,
    ) -> Result<ComposedCommand, ConfigurationError> {
        if self.driver.trim().is_empty() {
            return Err(ConfigurationError::EmptyDriver);
        }

        let output_name = config.output_name();
        if output_name.trim().is_empty() {
            return Err(ConfigurationError::EmptyOutputName);
        }

        let set = self
            .registry
            .lookup(config.architecture(), config.variant())?;

        let mut args = Vec::with_capacity(
            set.defines.len()
                + set.behavior.len()
                + set.warnings.len()
                + set.optimization.len()
                + self.sources.len()
                + config.additional_files().len()
                + self.libraries.len()
                + config.additional_libraries().len()
                + set.linker.len()
                + 2,
        );

        args.extend(set.defines);
        args.extend(set.behavior);
        args.extend(set.warnings);
        args.extend(set.optimization);
        args.push(format!("{}{}.map", self.map_file_flag, output_name));
        args.extend(self.sources.iter().cloned());
        args.extend(config.additional_files().iter().cloned());
        args.extend(self.libraries.iter().cloned());
        args.extend(config.additional_libraries().iter().cloned());
        args.push(self.registry.linker_separator().to_string());
        args.extend(set.linker);

        Ok(ComposedCommand::new(
            self.driver.clone(),
            args,
            self.working_dir.clone(),
        ))
    }
}
