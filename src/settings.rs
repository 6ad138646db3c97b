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

//! Project settings file (`hmbuild.toml`).
//!
//! Every field is optional; anything left out keeps its built-in value.
//!
//! ```toml
//! build_dir = "build"
//! sources = ["../src/win32/win32-handmade-hero.cpp"]
//! libraries = ["user32.lib"]
//!
//! [toolchain]
//! driver = "cl"
//! map_file_flag = "-Fm"
//! linker_separator = "/link"
//!
//! [bootstrap]
//! command = ["cmd", "/d", "/c", "call", "vcvarsall.bat", "{arch}", "&&", "set"]
//!
//! [lint]
//! enabled = true
//! command = ["cppcheck", "--quiet", "src"]
//!
//! # Replaces the built-in flag sets entirely when present.
//! [[flag_set]]
//! architecture = "x64"
//! variant = "release"
//! name = "custom"
//! version = 2
//! optimization = ["-O2"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::compose::{
    CommandComposer, DEFAULT_DRIVER, DEFAULT_LIBRARIES, DEFAULT_MAP_FILE_FLAG, DEFAULT_SOURCES,
};
use crate::config::{Architecture, Variant};
use crate::env::{default_bootstrap, Bootstrap};
use crate::error::ConfigurationError;
use crate::flags::{FlagSet, FlagSetRegistry, LINKER_SEPARATOR};
use crate::lint::{LintPass, DEFAULT_LINT_COMMAND};

/// File name looked up in the invocation directory.
pub const SETTINGS_FILE_NAME: &str = "hmbuild.toml";

/// Directory for all toolchain artifacts.
pub const DEFAULT_BUILD_DIR: &str = "build";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ToolchainSettings {
    pub driver: String,
    pub map_file_flag: String,
    pub linker_separator: String,
}

impl Default for ToolchainSettings {
    fn default() -> Self {
        Self {
            driver: DEFAULT_DRIVER.to_string(),
            map_file_flag: DEFAULT_MAP_FILE_FLAG.to_string(),
            linker_separator: LINKER_SEPARATOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BootstrapSettings {
    /// Token template; `{arch}` is replaced. Empty disables the bootstrap.
    pub command: Vec<String>,
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        Self {
            command: default_bootstrap(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LintSettings {
    pub enabled: bool,
    pub command: Vec<String>,
}

impl Default for LintSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            command: DEFAULT_LINT_COMMAND.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A flag set entry in the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FlagSetEntry {
    pub architecture: Architecture,
    pub variant: Variant,
    #[serde(flatten)]
    pub set: FlagSet,
}

/// All project settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub build_dir: PathBuf,
    pub sources: Vec<String>,
    pub libraries: Vec<String>,
    pub toolchain: ToolchainSettings,
    pub bootstrap: BootstrapSettings,
    pub lint: LintSettings,
    #[serde(rename = "flag_set")]
    pub flag_sets: Vec<FlagSetEntry>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from(DEFAULT_BUILD_DIR),
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            libraries: DEFAULT_LIBRARIES.iter().map(|s| s.to_string()).collect(),
            toolchain: ToolchainSettings::default(),
            bootstrap: BootstrapSettings::default(),
            lint: LintSettings::default(),
            flag_sets: Vec::new(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text. `path` is only used in errors.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigurationError> {
        toml::from_str(text).map_err(|e| ConfigurationError::InvalidSettings {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Read settings from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigurationError::ReadSettings {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!(path = %path.display(), "loaded settings");
        Self::parse(&text, path)
    }

    /// Load `explicit` if given, else `hmbuild.toml` in `dir` if present,
    /// else the built-in defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigurationError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.join(SETTINGS_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            debug!("no settings file, using defaults");
            Ok(Self::default())
        }
    }

    /// The flag registry: the built-in sets, or exactly the listed ones.
    pub fn registry(&self) -> FlagSetRegistry {
        let registry = if self.flag_sets.is_empty() {
            FlagSetRegistry::builtin()
        } else {
            let mut registry = FlagSetRegistry::empty();
            for entry in &self.flag_sets {
                registry.insert(entry.architecture, entry.variant, entry.set.clone());
            }
            registry
        };
        registry.with_linker_separator(self.toolchain.linker_separator.clone())
    }

    pub fn composer(&self) -> CommandComposer {
        CommandComposer::new(self.registry(), self.build_dir.clone())
            .with_driver(self.toolchain.driver.clone())
            .with_map_file_flag(self.toolchain.map_file_flag.clone())
            .with_sources(self.sources.clone())
            .with_libraries(self.libraries.clone())
    }

    pub fn bootstrap(&self) -> Bootstrap {
        Bootstrap::new(self.bootstrap.command.clone())
    }

    /// The lint pass, or `None` if disabled.
    pub fn lint_pass(&self) -> Option<LintPass> {
        self.lint
            .enabled
            .then(|| LintPass::new(self.lint.command.clone()))
    }
}
