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

//! Build request values.

use std::fmt;

use clap::ValueEnum;
use serde::Deserialize;

/// Output name used when the caller does not provide one.
pub const DEFAULT_OUTPUT_NAME: &str = "win32_handmade_hero";

/// Target architecture. Selects the environment bootstrap and word size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    /// 32-bit.
    X86,
    /// 64-bit.
    #[default]
    X64,
}

impl Architecture {
    /// The name passed to the environment bootstrap script.
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::X86 => "x86",
            Architecture::X64 => "x64",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, ValueEnum, Deserialize)]
pub enum Variant {
    /// Optimized, no development defines.
    #[serde(rename = "release")]
    Release,
    /// Optimization disabled, development and debug defines set.
    #[default]
    #[value(name = "debug", alias = "development-debug")]
    #[serde(rename = "debug", alias = "development-debug")]
    DevelopmentDebug,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Release => "release",
            Variant::DevelopmentDebug => "debug",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One build request.
///
/// Constructed once per invocation and never mutated afterwards; the
/// `with_*` methods consume the value and return a new one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildConfiguration {
    architecture: Architecture,
    variant: Variant,
    output_name: Option<String>,
    additional_files: Vec<String>,
    additional_libraries: Vec<String>,
}

impl BuildConfiguration {
    /// Create a configuration with no extra inputs and the default output name.
    pub fn new(architecture: Architecture, variant: Variant) -> Self {
        Self {
            architecture,
            variant,
            ..Self::default()
        }
    }

    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    pub fn with_additional_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additional_files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_additional_libraries<I, S>(mut self, libraries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additional_libraries = libraries.into_iter().map(Into::into).collect();
        self
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The output name after defaulting. May still be empty if the caller
    /// explicitly passed an empty name.
    pub fn output_name(&self) -> &str {
        self.output_name.as_deref().unwrap_or(DEFAULT_OUTPUT_NAME)
    }

    pub fn additional_files(&self) -> &[String] {
        &self.additional_files
    }

    pub fn additional_libraries(&self) -> &[String] {
        &self.additional_libraries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuildConfiguration::default();
        assert_eq!(config.architecture(), Architecture::X64);
        assert_eq!(config.variant(), Variant::DevelopmentDebug);
        assert_eq!(config.output_name(), DEFAULT_OUTPUT_NAME);
        assert!(config.additional_files().is_empty());
        assert!(config.additional_libraries().is_empty());
    }

    #[test]
    fn test_explicit_empty_output_is_kept() {
        let config = BuildConfiguration::default().with_output_name("");
        assert_eq!(config.output_name(), "");
    }

    #[test]
    fn test_additional_inputs_keep_order() {
        let config = BuildConfiguration::new(Architecture::X86, Variant::Release)
            .with_additional_files(["b.cpp", "a.cpp", "b.cpp"])
            .with_additional_libraries(vec!["winmm.lib".to_string()]);
        assert_eq!(config.additional_files(), ["b.cpp", "a.cpp", "b.cpp"]);
        assert_eq!(config.additional_libraries(), ["winmm.lib"]);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Architecture::X86.to_string(), "x86");
        assert_eq!(Variant::DevelopmentDebug.to_string(), "debug");
        assert_eq!(Variant::Release.to_string(), "release");
    }

    #[test]
    fn test_variant_value_enum_alias() {
        let parsed = Variant::from_str("development-debug", false).unwrap();
        assert_eq!(parsed, Variant::DevelopmentDebug);
    }
}
