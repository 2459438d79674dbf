//! Version-control adapter.
//!
//! [`Vcs`] is the capability set the engine needs from version control.
//! [`GitCli`] implements it by running the `git` binary in the mirror
//! directory; every call is blocking and a non-zero exit is an error.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::error::VcsError;

/// Message of every snapshot commit.
pub const COMMIT_MESSAGE: &str = "autocommit";

/// Version-control operations on a mirror directory.
pub trait Vcs {
    /// Create a repository in `dir`. Called once, when the mirror is created.
    fn init(&self, dir: &Path) -> Result<(), VcsError>;

    /// Stage every change in the working tree, including untracked files.
    fn stage_all(&self, dir: &Path) -> Result<(), VcsError>;

    /// Whether the working tree or index differs from the last commit.
    fn is_dirty(&self, dir: &Path) -> Result<bool, VcsError>;

    fn commit(&self, dir: &Path, message: &str) -> Result<(), VcsError>;

    /// Whether at least one remote is configured.
    fn has_remote(&self, dir: &Path) -> Result<bool, VcsError>;

    fn push(&self, dir: &Path) -> Result<(), VcsError>;
}

/// [`Vcs`] over the `git` command-line binary.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
    identity: Option<(String, String)>,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            program: PathBuf::from("git"),
            identity: None,
        }
    }
}

impl GitCli {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific `git` executable instead of the one on `$PATH`.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Commit as `name <email>` regardless of the user's git config.
    pub fn with_identity(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.identity = Some((name.into(), email.into()));
        self
    }

    fn run(&self, dir: &Path, args: &[&str]) -> Result<Output, VcsError> {
        let mut full: Vec<OsString> = Vec::new();
        if let Some((name, email)) = &self.identity {
            full.push("-c".into());
            full.push(format!("user.name={name}").into());
            full.push("-c".into());
            full.push(format!("user.email={email}").into());
        }
        full.extend(args.iter().map(OsString::from));

        let command = format!("git {}", args.join(" "));
        tracing::debug!(dir = %dir.display(), "{command}");
        let output = Command::new(&self.program)
            .args(&full)
            .current_dir(dir)
            .output()
            .map_err(|source| VcsError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(VcsError::Failed {
                command,
                dir: dir.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        Ok(output)
    }

    fn run_stdout(&self, dir: &Path, args: &[&str]) -> Result<String, VcsError> {
        let output = self.run(dir, args)?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
    }

    /// git searches parent directories for a repository, so without this a
    /// mirror lacking its own `.git` would be committed into an enclosing one.
    fn require_repository(&self, dir: &Path) -> Result<(), VcsError> {
        if dir.join(".git").exists() {
            Ok(())
        } else {
            Err(VcsError::NotARepository {
                dir: dir.to_path_buf(),
            })
        }
    }
}

impl Vcs for GitCli {
    fn init(&self, dir: &Path) -> Result<(), VcsError> {
        // `git init` would silently reinitialize; a second init is a caller bug.
        if dir.join(".git").exists() {
            return Err(VcsError::AlreadyInitialized {
                dir: dir.to_path_buf(),
            });
        }
        self.run(dir, &["init", "--quiet"]).map(drop)
    }

    fn stage_all(&self, dir: &Path) -> Result<(), VcsError> {
        self.require_repository(dir)?;
        self.run(dir, &["add", "--all", "."]).map(drop)
    }

    fn is_dirty(&self, dir: &Path) -> Result<bool, VcsError> {
        self.require_repository(dir)?;
        Ok(!self.run_stdout(dir, &["status", "--porcelain"])?.is_empty())
    }

    fn commit(&self, dir: &Path, message: &str) -> Result<(), VcsError> {
        self.require_repository(dir)?;
        self.run(dir, &["commit", "--quiet", "-m", message]).map(drop)
    }

    fn has_remote(&self, dir: &Path) -> Result<bool, VcsError> {
        self.require_repository(dir)?;
        Ok(!self.run_stdout(dir, &["remote"])?.is_empty())
    }

    fn push(&self, dir: &Path) -> Result<(), VcsError> {
        self.require_repository(dir)?;
        self.run(dir, &["push", "--quiet"]).map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_refuses_existing_repository() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::create_dir(dir.path().join(".git")).expect("mkdir");
        let err = GitCli::new().init(dir.path()).unwrap_err();
        assert!(matches!(err, VcsError::AlreadyInitialized { .. }), "got: {err}");
    }

    #[test]
    fn missing_binary_is_spawn_error() {
        let dir = TempDir::new().expect("tempdir");
        let git = GitCli::new().with_program(dir.path().join("no-such-git"));
        let err = git.init(dir.path()).unwrap_err();
        assert!(matches!(err, VcsError::Spawn { .. }), "got: {err}");
        assert!(err.to_string().contains("git init"));
    }

    #[test]
    fn operations_outside_a_repository_are_refused() {
        let dir = TempDir::new().expect("tempdir");
        let git = GitCli::new().with_program(dir.path().join("no-such-git"));
        // The check runs before git is spawned, so a missing binary is never reached.
        for err in [
            git.stage_all(dir.path()).unwrap_err(),
            git.is_dirty(dir.path()).unwrap_err(),
            git.commit(dir.path(), COMMIT_MESSAGE).unwrap_err(),
            git.has_remote(dir.path()).unwrap_err(),
            git.push(dir.path()).unwrap_err(),
        ] {
            assert!(matches!(err, VcsError::NotARepository { .. }), "got: {err}");
        }
    }
}
