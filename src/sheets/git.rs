#![forbid(unsafe_code)]

//! Version control backend for sheet repositories

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, ExitStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    /// The git executable could not be started
    #[error("Failed to run git {action}: {source}")]
    Spawn {
        action: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// git ran but reported failure
    #[error("git {action} exited with {status}")]
    Failed {
        action: &'static str,
        status: ExitStatus,
    },
}

/// Clone and pull operations used by the sheet manager
pub trait VersionControl {
    /// Clones `url` into `dest`, which must not exist yet
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), GitError>;

    /// Pulls the repository checked out at `repo`
    fn pull(&self, repo: &Path) -> Result<(), GitError>;
}

/// Environment variable naming the git executable to run
pub const GIT_ENV: &str = "CRYPTIC_RESOLVER_GIT";

/// Runs the `git` command line client
///
/// git's own progress output goes straight to the terminal.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: OsString,
}

impl GitCli {
    pub fn new() -> Self {
        GitCli {
            program: OsString::from("git"),
        }
    }

    /// Uses `CRYPTIC_RESOLVER_GIT` when set, else `git` from `PATH`
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var_os(GIT_ENV))
    }

    fn from_env_value(value: Option<OsString>) -> Self {
        match value.filter(|v| !v.is_empty()) {
            Some(program) => Self::with_program(program),
            None => Self::new(),
        }
    }

    /// Uses a specific git executable instead of the one on `PATH`
    pub fn with_program(program: impl Into<OsString>) -> Self {
        GitCli {
            program: program.into(),
        }
    }

    fn run(&self, action: &'static str, command: &mut Command) -> Result<(), GitError> {
        tracing::info!(action, command = ?command, "running git");
        let status = command
            .status()
            .map_err(|source| GitError::Spawn { action, source })?;
        if status.success() {
            Ok(())
        } else {
            Err(GitError::Failed { action, status })
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for GitCli {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), GitError> {
        let mut command = Command::new(&self.program);
        command.arg("clone").arg(url).arg(dest);
        self.run("clone", &mut command)
    }

    fn pull(&self, repo: &Path) -> Result<(), GitError> {
        let mut command = Command::new(&self.program);
        command.arg("-C").arg(repo).arg("pull");
        self.run("pull", &mut command)
    }
}
