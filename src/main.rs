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

//! hmbuild CLI
//!
//! Builds the Handmade Hero Win32 platform layer with MSVC.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use hmbuild::config::{Architecture, BuildConfiguration, Variant};
use hmbuild::orchestrator::BuildOrchestrator;
use hmbuild::report::ConsoleReporter;
use hmbuild::runner::SystemRunner;
use hmbuild::settings::Settings;

/// hmbuild - Build orchestrator for the Handmade Hero Win32 platform layer
#[derive(Parser, Debug)]
#[command(name = "hmbuild")]
#[command(version)]
#[command(about = "Build orchestrator for the Handmade Hero Win32 platform layer")]
#[command(long_about = r#"
hmbuild sets up the MSVC environment for the selected architecture, runs an
advisory lint pass over the project and compiles the platform layer inside
the build/ directory.

Example usage:
  hmbuild
  hmbuild --arch x86 --output game
  hmbuild --variant release --files ../src/extra.cpp --libs winmm.lib

Show the compile command without running anything:
  hmbuild --print-command
"#)]
struct Cli {
    /// Target architecture
    #[arg(long, value_enum, default_value_t = Architecture::X64)]
    arch: Architecture,

    /// Build variant
    #[arg(long, value_enum, default_value_t = Variant::DevelopmentDebug)]
    variant: Variant,

    /// Additional source files to compile
    #[arg(long, num_args = 0..)]
    files: Vec<String>,

    /// Additional libraries to link
    #[arg(long, num_args = 0..)]
    libs: Vec<String>,

    /// Output file name (without extension)
    #[arg(short, long)]
    output: Option<String>,

    /// Settings file (default: hmbuild.toml in the current directory, if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the lint pass
    #[arg(long)]
    no_lint: bool,

    /// Print the compile command, one token per line, and exit
    #[arg(long)]
    print_command: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("hmbuild=debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: Cannot determine current directory: {}", e);
            return ExitCode::from(3);
        }
    };

    let settings = match Settings::discover(cli.config.as_deref(), &cwd) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let mut config = BuildConfiguration::new(cli.arch, cli.variant)
        .with_additional_files(cli.files)
        .with_additional_libraries(cli.libs);
    if let Some(output) = cli.output {
        config = config.with_output_name(output);
    }

    let composer = settings.composer();

    if cli.print_command {
        return match composer.compose(&config) {
            Ok(command) => {
                for token in command.tokens() {
                    println!("{}", token);
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(2)
            }
        };
    }

    if cli.verbose {
        println!("hmbuild v{}", hmbuild::VERSION);
        println!("Architecture: {}", config.architecture());
        println!("Variant: {}", config.variant());
        println!("Output: {}", config.output_name());
        println!("Build directory: {}", composer.working_dir().display());
        println!();
    }

    let lint = if cli.no_lint {
        None
    } else {
        settings.lint_pass()
    };

    let orchestrator = BuildOrchestrator::new(SystemRunner::new(), composer)
        .with_bootstrap(settings.bootstrap())
        .with_lint(lint);

    let mut reporter = ConsoleReporter::new(cli.verbose);
    let report = orchestrator.build(&config, &mut reporter);

    if report.succeeded() {
        println!("Built {}", config.output_name());
    }

    ExitCode::from(report.exit_code())
}
