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

//! Error types for the build orchestrator.
//!
//! Only two kinds of failure interrupt a build: an invalid configuration and
//! a process that could not be started. A toolchain that runs and exits
//! non-zero is not an error; it is reported through
//! [`ProcessResult`](crate::runner::ProcessResult).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::{Architecture, Variant};

/// An invalid or incomplete build configuration.
///
/// Raised before any process is spawned.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// No flag set is registered for this combination.
    #[error("no flag set registered for {architecture}/{variant}")]
    UnknownFlagSet {
        architecture: Architecture,
        variant: Variant,
    },

    /// The registered flag set has no tokens at all.
    #[error("flag set '{name}' for {architecture}/{variant} is empty")]
    EmptyFlagSet {
        name: String,
        architecture: Architecture,
        variant: Variant,
    },

    /// The output name is empty after defaulting.
    #[error("output name must not be empty")]
    EmptyOutputName,

    /// No toolchain driver configured.
    #[error("toolchain driver must not be empty")]
    EmptyDriver,

    /// The settings file could not be read.
    #[error("cannot read settings file {path}: {source}")]
    ReadSettings {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The settings file is not valid TOML or has the wrong shape.
    #[error("invalid settings file {path}: {source}")]
    InvalidSettings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// An external process could not be started.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The program is not on the PATH the child would see.
    #[error("program '{program}' not found on PATH")]
    ProgramNotFound { program: String },

    /// The program was found but could not be spawned.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// A working directory could not be created, entered or restored.
    #[error("working directory {path} is not accessible: {source}")]
    WorkingDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A command without a program token.
    #[error("command has no program to run")]
    EmptyCommand,
}

/// Any failure that aborts a build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("launch error: {0}")]
    Launch(#[from] LaunchError),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;
