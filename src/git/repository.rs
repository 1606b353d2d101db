use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Command;

use git2::{Repository as Git2Repo, StatusOptions};

use crate::error::{ReleaseHooksError, Result};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Run a `git` subcommand in the work tree and return its stdout.
    fn run_git(&self, args: &[&str]) -> Result<String> {
        let workdir = super::Repository::workdir(self)?;

        let output = Command::new("git")
            .args(args)
            .current_dir(&workdir)
            .output()
            .map_err(|e| ReleaseHooksError::command(format!("Failed to run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReleaseHooksError::command(format!(
                "git {} exited with code {}: {}",
                args.join(" "),
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl super::Repository for Git2Repository {
    fn workdir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| ReleaseHooksError::repository("Bare repositories have no work tree"))
    }

    fn current_branch(&self) -> Result<String> {
        // Read HEAD symbolically so an unborn branch still resolves.
        let head = self.repo.find_reference("HEAD")?;
        let target = head
            .symbolic_target()
            .ok_or_else(|| ReleaseHooksError::branch("HEAD is detached"))?;

        target
            .strip_prefix("refs/heads/")
            .map(str::to_string)
            .ok_or_else(|| {
                ReleaseHooksError::branch(format!("HEAD points outside refs/heads: {}", target))
            })
    }

    fn tracked_files(&self) -> Result<Vec<PathBuf>> {
        let index = self.repo.index()?;

        // Conflicted paths appear once per stage
        let paths: BTreeSet<PathBuf> = index
            .iter()
            .map(|entry| PathBuf::from(String::from_utf8_lossy(&entry.path).into_owned()))
            .collect();

        Ok(paths.into_iter().collect())
    }

    fn is_clean(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options.include_untracked(false).include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(statuses.is_empty())
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        match self.repo.find_remote(remote) {
            Ok(found) => Ok(found.url().map(str::to_string)),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) if e.class() == git2::ErrorClass::Config => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_hooks_path(&self, path: &str) -> Result<()> {
        let mut config = self.repo.config()?;
        config.set_str("core.hooksPath", path)?;
        Ok(())
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.run_git(&["checkout", branch]).map(|_| ())
    }

    fn merge(&self, branch: &str) -> Result<()> {
        // A short name would resolve to a same-named tag before the branch
        let full_ref = format!("refs/heads/{}", branch);
        self.run_git(&["merge", "--no-ff", "--no-edit", &full_ref])
            .map(|_| ())
    }

    fn merge_abort(&self) -> Result<()> {
        self.run_git(&["merge", "--abort"]).map(|_| ())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.run_git(&["push", remote, branch]).map(|_| ())
    }
}

// SAFETY: git2::Repository is Send; the wrapper is only used from one thread
// at a time by the CLI workflows.
unsafe impl Sync for Git2Repository {}
