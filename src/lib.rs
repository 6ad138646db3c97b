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

//! hmbuild Library
//!
//! This library turns a small build request into a fully specified toolchain
//! invocation, runs it in an isolated build directory and classifies the
//! outcome.
//!
//! # Modules
//!
//! - [`config`] - Build requests
//! - [`flags`] - Toolchain flag sets per architecture and variant
//! - [`compose`] - Composing the compile command
//! - [`runner`] - Running processes and scoping the working directory
//! - [`env`] - Toolchain environment bootstrap
//! - [`lint`] - Advisory static analysis
//! - [`orchestrator`] - Sequencing a build end to end
//! - [`report`] - Reporting captured output
//! - [`settings`] - The `hmbuild.toml` project file
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```no_run
//! use hmbuild::config::{Architecture, BuildConfiguration, Variant};
//! use hmbuild::orchestrator::BuildOrchestrator;
//! use hmbuild::report::ConsoleReporter;
//! use hmbuild::runner::SystemRunner;
//! use hmbuild::settings::Settings;
//!
//! let settings = Settings::default();
//! let orchestrator = BuildOrchestrator::new(SystemRunner::new(), settings.composer())
//!     .with_bootstrap(settings.bootstrap())
//!     .with_lint(settings.lint_pass());
//!
//! let config = BuildConfiguration::new(Architecture::X64, Variant::Release)
//!     .with_output_name("game");
//! let report = orchestrator.build(&config, &mut ConsoleReporter::new(false));
//! std::process::exit(report.exit_code().into());
//! ```

pub mod compose;
pub mod config;
pub mod env;
pub mod error;
pub mod flags;
pub mod lint;
pub mod orchestrator;
pub mod report;
pub mod runner;
pub mod settings;

// Re-export commonly used types
pub use compose::{CommandComposer, ComposedCommand};
pub use config::{Architecture, BuildConfiguration, Variant};
pub use error::{BuildError, ConfigurationError, LaunchError};
pub use orchestrator::{BuildOrchestrator, BuildOutcome, BuildReport, BuildState};
pub use runner::{ProcessResult, ProcessRunner};

/// The version of hmbuild.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the tool.
pub const NAME: &str = "hmbuild";
