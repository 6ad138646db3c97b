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

//! Scoped change of the process working directory.

use std::env;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::LaunchError;

/// Changes the working directory on creation and restores it on drop.
///
/// The working directory is process-global, so only one guard should be
/// alive at a time.
///
/// # Example
///
/// ```no_run
/// use hmbuild::runner::WorkingDirGuard;
///
/// let before = std::env::current_dir().unwrap();
/// {
///     let _guard = WorkingDirGuard::enter("build").unwrap();
///     // ... run the toolchain ...
/// }
/// assert_eq!(std::env::current_dir().unwrap(), before);
/// ```
#[derive(Debug)]
pub struct WorkingDirGuard {
    original: PathBuf,
    entered: PathBuf,
}

impl WorkingDirGuard {
    /// Remember the current directory and change into `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::WorkingDirectory`] if the current directory
    /// cannot be determined or `dir` cannot be entered. Nothing is changed in
    /// that case.
    pub fn enter(dir: impl AsRef<Path>) -> Result<Self, LaunchError> {
        let dir = dir.as_ref();
        let original = env::current_dir().map_err(|e| LaunchError::WorkingDirectory {
            path: PathBuf::from("."),
            source: e,
        })?;

        env::set_current_dir(dir).map_err(|e| LaunchError::WorkingDirectory {
            path: dir.to_path_buf(),
            source: e,
        })?;

        debug!(from = %original.display(), to = %dir.display(), "entered directory");

        Ok(Self {
            original,
            entered: dir.to_path_buf(),
        })
    }

    /// The directory that will be restored.
    pub fn original(&self) -> &Path {
        &self.original
    }

    /// The directory that was entered.
    pub fn entered(&self) -> &Path {
        &self.entered
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        match env::set_current_dir(&self.original) {
            Ok(()) => debug!(to = %self.original.display(), "restored directory"),
            Err(e) => warn!(
                to = %self.original.display(),
                error = %e,
                "failed to restore working directory"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_restores_on_drop() {
        let temp = tempfile::tempdir().unwrap();
        let before = env::current_dir().unwrap();

        {
            let guard = WorkingDirGuard::enter(temp.path()).unwrap();
            assert_eq!(guard.original(), before.as_path());
            assert_eq!(
                env::current_dir().unwrap().canonicalize().unwrap(),
                temp.path().canonicalize().unwrap()
            );
        }

        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    #[serial]
    fn test_restores_on_early_return() {
        fn fails_inside(dir: &Path) -> Result<(), LaunchError> {
            let _guard = WorkingDirGuard::enter(dir)?;
            Err(LaunchError::EmptyCommand)
        }

        let temp = tempfile::tempdir().unwrap();
        let before = env::current_dir().unwrap();
        assert!(fails_inside(temp.path()).is_err());
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    #[serial]
    fn test_missing_dir_leaves_cwd_alone() {
        let before = env::current_dir().unwrap();
        let temp = tempfile::tempdir().unwrap();
        let result = WorkingDirGuard::enter(temp.path().join("missing"));
        assert!(matches!(result, Err(LaunchError::WorkingDirectory { .. })));
        assert_eq!(env::current_dir().unwrap(), before);
    }
}
