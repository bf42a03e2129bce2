//! Environment bootstrapping.
//!
//! Guarantees a usable virtualenv exists before any task-specific tool runs.
//! Safe to invoke on every run: only the initial directory creation is
//! non-idempotent, and it is skipped once the directory exists. The
//! installer self-upgrade and manifest install always re-run; at the tool
//! level an already-satisfied dependency set is a no-op.
//!
//! Bootstrap failures are never swallowed. Without a valid environment
//! every downstream tool call would be meaningless, so each one aborts the
//! whole task.

use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::EnvironmentConfig;
use crate::execution::{ExecutionContext, ToolError, ToolRunner};

/// Errors from environment bootstrap. All are fatal for the task.
#[derive(Debug, Error)]
pub enum EnvironmentError {
    /// Virtualenv creation exited nonzero.
    #[error("could not create virtualenv at '{dir}' (exit code {code})")]
    CreateFailed { dir: PathBuf, code: i32 },

    /// The package installer failed to upgrade itself.
    #[error("pip self-upgrade failed (exit code {code})")]
    InstallerUpgradeFailed { code: i32 },

    /// Installing the dependency manifest exited nonzero.
    #[error("installing '{manifest}' failed (exit code {code})")]
    ManifestInstallFailed { manifest: PathBuf, code: i32 },

    /// A bootstrap tool could not be launched at all.
    #[error(transparent)]
    Launch(#[from] ToolError),
}

/// Idempotent virtualenv bootstrapper.
pub struct Ensurer<'a> {
    config: &'a EnvironmentConfig,
}

impl<'a> Ensurer<'a> {
    pub fn new(config: &'a EnvironmentConfig) -> Self {
        Self { config }
    }

    /// Ensure the virtualenv exists and is ready, returning the execution
    /// context that prefers its binaries for subsequent tool invocations.
    pub fn ensure<R: ToolRunner>(&self, runner: &R) -> Result<ExecutionContext, EnvironmentError> {
        let venv_dir = &self.config.venv_dir;

        if venv_dir.exists() {
            debug!("virtualenv {} already exists", venv_dir.display());
        } else {
            info!("creating virtualenv at {}", venv_dir.display());
            let dir_arg = venv_dir.to_string_lossy();
            let status = runner.run(
                &ExecutionContext::host(),
                &self.config.python,
                &["-m", "venv", dir_arg.as_ref()],
            )?;
            if !status.success() {
                return Err(EnvironmentError::CreateFailed {
                    dir: venv_dir.clone(),
                    code: status.code(),
                });
            }
        }

        let ctx = ExecutionContext::for_venv(venv_dir.clone());

        // pip behavior drifts across versions; upgrade unconditionally so
        // every run installs with the same installer.
        let status = runner.run(&ctx, "python", &["-m", "pip", "install", "--upgrade", "pip"])?;
        if !status.success() {
            return Err(EnvironmentError::InstallerUpgradeFailed {
                code: status.code(),
            });
        }

        if self.config.requirements.exists() {
            let manifest_arg = self.config.requirements.to_string_lossy();
            let status = runner.run(
                &ctx,
                "python",
                &["-m", "pip", "install", "-r", manifest_arg.as_ref()],
            )?;
            if !status.success() {
                return Err(EnvironmentError::ManifestInstallFailed {
                    manifest: self.config.requirements.clone(),
                    code: status.code(),
                });
            }
        } else {
            debug!(
                "no manifest at {}, skipping dependency install",
                self.config.requirements.display()
            );
        }

        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::testing::RecordingRunner;
    use tempfile::TempDir;

    fn env_config(tmp: &TempDir) -> EnvironmentConfig {
        EnvironmentConfig {
            python: "python3".to_string(),
            venv_dir: tmp.path().join(".venv"),
            requirements: tmp.path().join("requirements.txt"),
        }
    }

    #[test]
    fn test_ensure_creates_missing_venv() {
        let tmp = TempDir::new().unwrap();
        let config = env_config(&tmp);
        let runner = RecordingRunner::new();

        let ctx = Ensurer::new(&config).ensure(&runner).unwrap();
        assert!(ctx.is_venv());

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].program, "python3");
        assert_eq!(calls[0].args[..2], ["-m".to_string(), "venv".to_string()]);
        assert!(!calls[0].in_venv);
        // Installer upgrade runs inside the venv context.
        assert_eq!(calls[1].program, "python");
        assert!(calls[1].args.contains(&"--upgrade".to_string()));
        assert!(calls[1].in_venv);
    }

    #[test]
    fn test_ensure_skips_creation_when_venv_exists() {
        let tmp = TempDir::new().unwrap();
        let config = env_config(&tmp);
        std::fs::create_dir_all(&config.venv_dir).unwrap();
        let runner = RecordingRunner::new();

        Ensurer::new(&config).ensure(&runner).unwrap();

        let programs = runner.programs();
        assert_eq!(programs, vec!["python"]);
    }

    #[test]
    fn test_ensure_twice_creates_at_most_once() {
        let tmp = TempDir::new().unwrap();
        let config = env_config(&tmp);
        let runner = RecordingRunner::new();
        let ensurer = Ensurer::new(&config);

        ensurer.ensure(&runner).unwrap();
        // Simulate the venv tool's effect, which the recording runner omits.
        std::fs::create_dir_all(&config.venv_dir).unwrap();
        ensurer.ensure(&runner).unwrap();

        let creations = runner
            .calls()
            .iter()
            .filter(|call| call.args.contains(&"venv".to_string()))
            .count();
        assert_eq!(creations, 1);
        // The installer upgrade ran on both invocations.
        let upgrades = runner
            .calls()
            .iter()
            .filter(|call| call.args.contains(&"--upgrade".to_string()))
            .count();
        assert_eq!(upgrades, 2);
    }

    #[test]
    fn test_ensure_installs_manifest_when_present() {
        let tmp = TempDir::new().unwrap();
        let config = env_config(&tmp);
        std::fs::write(&config.requirements, "pandas\n").unwrap();
        let runner = RecordingRunner::new();

        Ensurer::new(&config).ensure(&runner).unwrap();

        let calls = runner.calls();
        let install = calls.last().unwrap();
        assert_eq!(install.program, "python");
        assert!(install.args.contains(&"-r".to_string()));
        assert!(install.in_venv);
    }

    #[test]
    fn test_failed_creation_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let config = env_config(&tmp);
        let runner = RecordingRunner::new();
        runner.script(&[1]);

        let err = Ensurer::new(&config).ensure(&runner).unwrap_err();
        assert!(matches!(err, EnvironmentError::CreateFailed { code: 1, .. }));
        // Nothing ran after the failed creation.
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn test_failed_installer_upgrade_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let config = env_config(&tmp);
        std::fs::create_dir_all(&config.venv_dir).unwrap();
        let runner = RecordingRunner::new();
        runner.script(&[3]);

        let err = Ensurer::new(&config).ensure(&runner).unwrap_err();
        assert!(matches!(
            err,
            EnvironmentError::InstallerUpgradeFailed { code: 3 }
        ));
    }

    #[test]
    fn test_failed_manifest_install_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let config = env_config(&tmp);
        std::fs::create_dir_all(&config.venv_dir).unwrap();
        std::fs::write(&config.requirements, "pandas\n").unwrap();
        let runner = RecordingRunner::new();
        runner.script(&[0, 2]);

        let err = Ensurer::new(&config).ensure(&runner).unwrap_err();
        assert!(matches!(
            err,
            EnvironmentError::ManifestInstallFailed { code: 2, .. }
        ));
    }
}
