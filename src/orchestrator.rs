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

//! End-to-end sequencing of one build request.
//!
//! A build moves through these states:
//!
//! ```text
//! Idle -> EnvironmentPrepared -> (LintRun)? -> Compiled -> Reported
//! ```
//!
//! A configuration or launch error jumps straight to `Reported`. The process
//! working directory is changed into the build directory for the duration of
//! the build and restored on every path out of it.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::compose::CommandComposer;
use crate::config::BuildConfiguration;
use crate::env::{parse_environment, Bootstrap};
use crate::error::{BuildError, LaunchError};
use crate::lint::{LintOutcome, LintPass};
use crate::report::{Reporter, Step};
use crate::runner::{ProcessResult, ProcessRunner, WorkingDirGuard};

/// States a build passes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Idle,
    EnvironmentPrepared,
    LintRun,
    Compiled,
    Reported,
}

/// How a build ended.
#[derive(Debug)]
pub enum BuildOutcome {
    /// The compile step exited with status zero.
    Succeeded(ProcessResult),
    /// The environment bootstrap exited non-zero; nothing was compiled.
    BootstrapFailed(ProcessResult),
    /// The toolchain ran and exited non-zero.
    ToolchainFailure(ProcessResult),
    /// A configuration or launch error stopped the build.
    Aborted(BuildError),
}

/// Everything known about a finished build.
#[derive(Debug)]
pub struct BuildReport {
    pub outcome: BuildOutcome,
    pub lint: Option<LintOutcome>,
    pub states: Vec<BuildState>,
}

impl BuildReport {
    /// Lint findings do not count against success.
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, BuildOutcome::Succeeded(_))
    }

    /// The process exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        match &self.outcome {
            BuildOutcome::Succeeded(_) => 0,
            BuildOutcome::BootstrapFailed(_) | BuildOutcome::ToolchainFailure(_) => 1,
            BuildOutcome::Aborted(BuildError::Configuration(_)) => 2,
            BuildOutcome::Aborted(BuildError::Launch(_)) => 3,
        }
    }
}

/// Runs bootstrap, lint and compile for a build request.
pub struct BuildOrchestrator<R> {
    runner: R,
    composer: CommandComposer,
    bootstrap: Bootstrap,
    lint: Option<LintPass>,
}

impl<R: ProcessRunner> BuildOrchestrator<R> {
    /// An orchestrator without bootstrap or lint.
    ///
    /// The build directory is the composer's working directory, relative to
    /// the current directory at build time.
    pub fn new(runner: R, composer: CommandComposer) -> Self {
        Self {
            runner,
            composer,
            bootstrap: Bootstrap::disabled(),
            lint: None,
        }
    }

    pub fn with_bootstrap(mut self, bootstrap: Bootstrap) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    pub fn with_lint(mut self, lint: Option<LintPass>) -> Self {
        self.lint = lint;
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run one build to completion.
    ///
    /// Never fails: errors end up in [`BuildReport::outcome`] and are passed
    /// to the reporter.
    pub fn build(&self, config: &BuildConfiguration, reporter: &mut dyn Reporter) -> BuildReport {
        let mut states = vec![BuildState::Idle];
        let mut lint = None;

        info!(
            architecture = %config.architecture(),
            variant = %config.variant(),
            output = config.output_name(),
            "starting build"
        );

        let outcome = match self.execute(config, reporter, &mut states, &mut lint) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "build aborted");
                reporter.error(&e);
                BuildOutcome::Aborted(e)
            }
        };

        states.push(BuildState::Reported);

        let report = BuildReport {
            outcome,
            lint,
            states,
        };
        info!(succeeded = report.succeeded(), "build finished");
        report
    }

    fn execute(
        &self,
        config: &BuildConfiguration,
        reporter: &mut dyn Reporter,
        states: &mut Vec<BuildState>,
        lint: &mut Option<LintOutcome>,
    ) -> Result<BuildOutcome, BuildError> {
        // Composed first so configuration errors surface before any spawn.
        let compile = self.composer.compose(config)?;

        let project_root = env::current_dir().map_err(|e| LaunchError::WorkingDirectory {
            path: PathBuf::from("."),
            source: e,
        })?;
        let build_dir = project_root.join(compile.working_dir());
        fs::create_dir_all(&build_dir).map_err(|e| LaunchError::WorkingDirectory {
            path: build_dir.clone(),
            source: e,
        })?;

        let _guard = WorkingDirGuard::enter(&build_dir)?;

        let environment = match self.prepare_environment(config, &build_dir, reporter)? {
            Ok(environment) => environment,
            Err(failed) => return Ok(BuildOutcome::BootstrapFailed(failed)),
        };
        states.push(BuildState::EnvironmentPrepared);

        if let Some(pass) = &self.lint {
            *lint = Some(self.run_lint(pass, &project_root, reporter));
            states.push(BuildState::LintRun);
        }

        let compile = compile.with_env(environment);
        reporter.started(Step::Compile, &compile);
        let result = self.runner.run(&compile, &build_dir)?;
        reporter.finished(Step::Compile, &result);
        states.push(BuildState::Compiled);

        if result.succeeded {
            Ok(BuildOutcome::Succeeded(result))
        } else {
            Ok(BuildOutcome::ToolchainFailure(result))
        }
    }

    /// Run the bootstrap, if any.
    ///
    /// The inner result is the captured environment on success, or the failed
    /// bootstrap's output.
    fn prepare_environment(
        &self,
        config: &BuildConfiguration,
        build_dir: &Path,
        reporter: &mut dyn Reporter,
    ) -> Result<Result<BTreeMap<String, String>, ProcessResult>, LaunchError> {
        let Some(command) = self.bootstrap.command(config.architecture(), build_dir) else {
            debug!("no environment bootstrap configured");
            return Ok(Ok(BTreeMap::new()));
        };

        reporter.started(Step::Bootstrap, &command);
        let result = self.runner.run(&command, build_dir)?;
        reporter.finished(Step::Bootstrap, &result);

        if !result.succeeded {
            warn!(code = ?result.code, "environment bootstrap failed");
            return Ok(Err(result));
        }

        let environment = parse_environment(&result.stdout);
        debug!(variables = environment.len(), "environment captured");
        Ok(Ok(environment))
    }

    /// Lint is advisory: every failure mode is turned into an outcome.
    fn run_lint(
        &self,
        pass: &LintPass,
        project_root: &Path,
        reporter: &mut dyn Reporter,
    ) -> LintOutcome {
        let Some(command) = pass.command(project_root) else {
            return LintOutcome::Skipped("no lint command configured".to_string());
        };

        reporter.started(Step::Lint, &command);
        match self.runner.run(&command, project_root) {
            Ok(result) => {
                reporter.finished(Step::Lint, &result);
                if !result.succeeded {
                    info!(code = ?result.code, "lint reported findings");
                }
                LintOutcome::from_result(result)
            }
            Err(e) => {
                let message = format!("lint skipped: {}", e);
                warn!("{}", message);
                reporter.warning(&message);
                LintOutcome::Skipped(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::ComposedCommand;
    use crate::error::ConfigurationError;

    #[test]
    fn test_exit_codes() {
        let report = |outcome| BuildReport {
            outcome,
            lint: None,
            states: vec![BuildState::Idle, BuildState::Reported],
        };

        assert_eq!(
            report(BuildOutcome::Succeeded(ProcessResult::success(""))).exit_code(),
            0
        );
        assert_eq!(
            report(BuildOutcome::ToolchainFailure(ProcessResult::failure(2, ""))).exit_code(),
            1
        );
        assert_eq!(
            report(BuildOutcome::BootstrapFailed(ProcessResult::failure(1, ""))).exit_code(),
            1
        );
        assert_eq!(
            report(BuildOutcome::Aborted(ConfigurationError::EmptyOutputName.into())).exit_code(),
            2
        );
        assert_eq!(
            report(BuildOutcome::Aborted(LaunchError::EmptyCommand.into())).exit_code(),
            3
        );
    }

    struct NeverRuns;

    impl ProcessRunner for NeverRuns {
        fn run(
            &self,
            command: &ComposedCommand,
            _working_dir: &Path,
        ) -> Result<ProcessResult, LaunchError> {
            panic!("unexpected spawn of {}", command);
        }
    }

    #[test]
    fn test_configuration_error_spawns_nothing() {
        let composer = CommandComposer::new(Default::default(), "build");
        let orchestrator = BuildOrchestrator::new(NeverRuns, composer)
            .with_lint(Some(LintPass::default()));
        let mut reporter = crate::report::RecordingReporter::default();

        let config = BuildConfiguration::default().with_output_name("");
        let report = orchestrator.build(&config, &mut reporter);

        assert!(matches!(
            report.outcome,
            BuildOutcome::Aborted(BuildError::Configuration(
                ConfigurationError::EmptyOutputName
            ))
        ));
        assert_eq!(report.states, [BuildState::Idle, BuildState::Reported]);
        assert_eq!(reporter.errors.len(), 1);
    }
}
