//! Version-control seam for the auto-sync loop.
//!
//! The [`Repository`] trait covers exactly the git operations the sync cycle
//! performs. The real implementation shells out to the external `git`
//! executable; tests plug in a `mockall` mock instead.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Command;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// Error from a git invocation. Carries the combined stdout/stderr so the
/// caller can log what the command actually said.
#[derive(Debug)]
pub enum GitError {
    Io(std::io::Error),
    CommandFailed { args: Vec<String>, output: String },
}

impl From<std::io::Error> for GitError {
    fn from(e: std::io::Error) -> Self {
        GitError::Io(e)
    }
}

/// Trait for the git operations one sync cycle needs.
/// Implemented by [`GitCli`] in production and by a generated mock in tests.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Repository: Send + Sync {
    /// Raw `status --porcelain` output for the working tree.
    async fn status_porcelain(&self) -> Result<String, GitError>;

    /// Stage every change, including untracked files.
    async fn stage_all(&self) -> Result<(), GitError>;

    /// Create a commit with the given message.
    async fn commit(&self, message: &str) -> Result<(), GitError>;

    /// Rebase local history onto the fetched remote branch.
    async fn pull_rebase(&self) -> Result<(), GitError>;

    /// Push local history to the remote.
    async fn push(&self) -> Result<(), GitError>;
}

/// Runs git subcommands against a working directory via the external
/// `git` executable.
pub struct GitCli {
    repo_dir: PathBuf,
}

impl GitCli {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    fn run_git(&self, args: &[&str]) -> Result<String, GitError> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo_dir)
            .args(args)
            .output()?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                args: args.iter().map(|a| (*a).to_string()).collect(),
                output: combined,
            });
        }
        Ok(combined)
    }
}

#[async_trait]
impl Repository for GitCli {
    async fn status_porcelain(&self) -> Result<String, GitError> {
        self.run_git(&["status", "--porcelain"])
    }

    async fn stage_all(&self) -> Result<(), GitError> {
        self.run_git(&["add", "--all"]).map(|_| ())
    }

    async fn commit(&self, message: &str) -> Result<(), GitError> {
        self.run_git(&["commit", "-m", message]).map(|_| ())
    }

    async fn pull_rebase(&self) -> Result<(), GitError> {
        self.run_git(&["pull", "--rebase"]).map(|_| ())
    }

    async fn push(&self) -> Result<(), GitError> {
        self.run_git(&["push"]).map(|_| ())
    }
}

/// Whether porcelain output reports any uncommitted change.
/// An all-whitespace result means a clean tree.
pub fn has_changes(porcelain: &str) -> bool {
    !porcelain.trim().is_empty()
}
