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

//! Toolchain flag sets.
//!
//! A [`FlagSet`] groups the tokens contributed for one architecture and build
//! variant. Groups are emitted in this order by the composer:
//!
//! 1. defines
//! 2. behavior
//! 3. warnings
//! 4. optimization / debug information
//! 5. linker flags, after the registry's linker separator
//!
//! Flag sets are atomic: a lookup hands out a whole set, never a mix of
//! groups from different entries.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::config::{Architecture, Variant};
use crate::error::ConfigurationError;

/// Token separating compiler arguments from linker arguments.
pub const LINKER_SEPARATOR: &str = "/link";

const BEHAVIOR_FLAGS: &[&str] = &[
    "-nologo", // no startup banner
    "-Oi",     // intrinsics
    "-GR-",    // no RTTI
    "-EHa-",   // no exception handling
    "-MT",     // static CRT
    "-Gm-",    // no minimal rebuild
];

const WARNING_FLAGS: &[&str] = &[
    "-W4",
    "-wd4201", // nameless struct/union
    "-wd4127", // constant conditional expression
    "-wd4100", // unreferenced formal parameter
];

/// An ordered, named and versioned set of toolchain tokens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FlagSet {
    pub name: String,
    pub version: u32,
    pub defines: Vec<String>,
    pub behavior: Vec<String>,
    pub warnings: Vec<String>,
    pub optimization: Vec<String>,
    pub linker: Vec<String>,
}

impl Default for FlagSet {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: 1,
            defines: Vec::new(),
            behavior: Vec::new(),
            warnings: Vec::new(),
            optimization: Vec::new(),
            linker: Vec::new(),
        }
    }
}

impl FlagSet {
    /// The built-in MSVC flag set for a combination.
    pub fn builtin(architecture: Architecture, variant: Variant) -> Self {
        let (defines, optimization): (&[&str], &[&str]) = match variant {
            Variant::Release => (&["-DDEV=0", "-DDEBUG=0"], &["-O2", "-FC", "-Z7"]),
            Variant::DevelopmentDebug => (&["-DDEV=1", "-DDEBUG=1"], &["-Od", "-FC", "-Z7"]),
        };
        let linker: &[&str] = match architecture {
            Architecture::X86 => &["-subsystem:windows,5.1", "-opt:ref"],
            Architecture::X64 => &["-opt:ref"],
        };

        Self {
            name: format!("msvc-{}-{}", architecture, variant),
            version: 1,
            defines: to_tokens(defines),
            behavior: to_tokens(BEHAVIOR_FLAGS),
            warnings: to_tokens(WARNING_FLAGS),
            optimization: to_tokens(optimization),
            linker: to_tokens(linker),
        }
    }

    /// Check if every group is empty.
    pub fn is_empty(&self) -> bool {
        self.defines.is_empty()
            && self.behavior.is_empty()
            && self.warnings.is_empty()
            && self.optimization.is_empty()
            && self.linker.is_empty()
    }
}

fn to_tokens(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

/// Flag sets keyed by architecture and variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSetRegistry {
    entries: BTreeMap<(Architecture, Variant), FlagSet>,
    linker_separator: String,
}

impl Default for FlagSetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FlagSetRegistry {
    /// An empty registry. Every lookup fails until sets are inserted.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
            linker_separator: LINKER_SEPARATOR.to_string(),
        }
    }

    /// The registry with the built-in set for every combination.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for architecture in [Architecture::X86, Architecture::X64] {
            for variant in [Variant::Release, Variant::DevelopmentDebug] {
                registry.insert(architecture, variant, FlagSet::builtin(architecture, variant));
            }
        }
        registry
    }

    /// Register a set, replacing any previous one for the same combination.
    pub fn insert(&mut self, architecture: Architecture, variant: Variant, set: FlagSet) {
        self.entries.insert((architecture, variant), set);
    }

    pub fn with_linker_separator(mut self, separator: impl Into<String>) -> Self {
        self.linker_separator = separator.into();
        self
    }

    pub fn linker_separator(&self) -> &str {
        &self.linker_separator
    }

    /// Number of registered combinations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the set for a combination.
    ///
    /// Returns an independent copy, so callers cannot affect other lookups.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownFlagSet`] if nothing is registered
    /// and [`ConfigurationError::EmptyFlagSet`] if the registered set has no
    /// tokens.
    pub fn lookup(
        &self,
        architecture: Architecture,
        variant: Variant,
    ) -> Result<FlagSet, ConfigurationError> {
        let set = self
            .entries
            .get(&(architecture, variant))
            .ok_or(ConfigurationError::UnknownFlagSet {
                architecture,
                variant,
            })?;

        if set.is_empty() {
            return Err(ConfigurationError::EmptyFlagSet {
                name: set.name.clone(),
                architecture,
                variant,
            });
        }

        Ok(set.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Architecture::X86, Variant::Release)]
    #[test_case(Architecture::X86, Variant::DevelopmentDebug)]
    #[test_case(Architecture::X64, Variant::Release)]
    #[test_case(Architecture::X64, Variant::DevelopmentDebug)]
    fn test_builtin_has_every_combination(architecture: Architecture, variant: Variant) {
        let set = FlagSetRegistry::builtin()
            .lookup(architecture, variant)
            .unwrap();
        assert!(!set.is_empty());
        assert_eq!(set.behavior.first().map(String::as_str), Some("-nologo"));
        assert_eq!(set.linker.last().map(String::as_str), Some("-opt:ref"));
    }

    #[test]
    fn test_debug_disables_optimization() {
        let set = FlagSet::builtin(Architecture::X64, Variant::DevelopmentDebug);
        assert_eq!(set.defines, ["-DDEV=1", "-DDEBUG=1"]);
        assert!(set.optimization.contains(&"-Od".to_string()));
    }

    #[test]
    fn test_release_optimizes() {
        let set = FlagSet::builtin(Architecture::X64, Variant::Release);
        assert!(!set.defines.contains(&"-DDEBUG=1".to_string()));
        assert!(!set.optimization.contains(&"-Od".to_string()));
        assert!(set.optimization.contains(&"-O2".to_string()));
    }

    #[test]
    fn test_x86_targets_legacy_subsystem() {
        let x86 = FlagSet::builtin(Architecture::X86, Variant::Release);
        let x64 = FlagSet::builtin(Architecture::X64, Variant::Release);
        assert_eq!(x86.linker, ["-subsystem:windows,5.1", "-opt:ref"]);
        assert_eq!(x64.linker, ["-opt:ref"]);
    }

    #[test]
    fn test_lookup_unknown_combination() {
        let mut registry = FlagSetRegistry::empty();
        registry.insert(
            Architecture::X64,
            Variant::Release,
            FlagSet::builtin(Architecture::X64, Variant::Release),
        );

        let result = registry.lookup(Architecture::X86, Variant::Release);
        assert!(matches!(
            result,
            Err(ConfigurationError::UnknownFlagSet {
                architecture: Architecture::X86,
                variant: Variant::Release,
            })
        ));
    }

    #[test]
    fn test_lookup_empty_set() {
        let mut registry = FlagSetRegistry::empty();
        registry.insert(
            Architecture::X64,
            Variant::Release,
            FlagSet {
                name: "nothing".to_string(),
                ..FlagSet::default()
            },
        );

        let result = registry.lookup(Architecture::X64, Variant::Release);
        assert!(matches!(result, Err(ConfigurationError::EmptyFlagSet { .. })));
    }

    #[test]
    fn test_lookup_returns_independent_copy() {
        let registry = FlagSetRegistry::builtin();
        let mut first = registry
            .lookup(Architecture::X64, Variant::DevelopmentDebug)
            .unwrap();
        first.defines.push("-DEXTRA".to_string());

        let second = registry
            .lookup(Architecture::X64, Variant::DevelopmentDebug)
            .unwrap();
        assert!(!second.defines.contains(&"-DEXTRA".to_string()));
    }

    #[test]
    fn test_builtin_registry_size() {
        let registry = FlagSetRegistry::builtin();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.linker_separator(), "/link");
    }
}
