use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{ReleaseHooksError, Result};
use crate::git::Repository;

/// Mock repository for testing without actual git operations
///
/// Mutating operations are recorded as git-like command strings
/// (`"checkout master"`, `"push origin master"`) in call order.
pub struct MockRepository {
    workdir: PathBuf,
    branch: Option<String>,
    tracked: Vec<PathBuf>,
    clean: bool,
    remotes: HashMap<String, String>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl MockRepository {
    /// Create a mock whose work tree is `workdir`, checked out on `branch`
    pub fn new(workdir: impl Into<PathBuf>, branch: impl Into<String>) -> Self {
        MockRepository {
            workdir: workdir.into(),
            branch: Some(branch.into()),
            tracked: Vec::new(),
            clean: true,
            remotes: HashMap::new(),
            failing: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Detach HEAD
    pub fn detach(&mut self) {
        self.branch = None;
    }

    pub fn track(&mut self, path: impl Into<PathBuf>) {
        self.tracked.push(path.into());
    }

    pub fn set_clean(&mut self, clean: bool) {
        self.clean = clean;
    }

    pub fn add_remote(&mut self, name: impl Into<String>, url: impl Into<String>) {
        self.remotes.insert(name.into(), url.into());
    }

    /// Make an operation fail; `op` is the first word of the recorded call
    /// (`"merge"`, `"push"`, ...).
    pub fn fail_on(&mut self, op: impl Into<String>) {
        self.failing.insert(op.into());
    }

    /// Recorded calls, oldest first
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) -> Result<()> {
        let op = call.split_whitespace().next().unwrap_or_default().to_string();
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call.clone());
        }

        if self.failing.contains(&op) {
            return Err(ReleaseHooksError::command(format!("mock failure: {}", call)));
        }
        Ok(())
    }
}

impl Repository for MockRepository {
    fn workdir(&self) -> Result<PathBuf> {
        Ok(self.workdir.clone())
    }

    fn current_branch(&self) -> Result<String> {
        self.branch
            .clone()
            .ok_or_else(|| ReleaseHooksError::branch("HEAD is detached"))
    }

    fn tracked_files(&self) -> Result<Vec<PathBuf>> {
        Ok(self.tracked.clone())
    }

    fn is_clean(&self) -> Result<bool> {
        Ok(self.clean)
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        Ok(self.remotes.get(remote).cloned())
    }

    fn set_hooks_path(&self, path: &str) -> Result<()> {
        self.record(format!("config core.hooksPath {}", path))
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.record(format!("checkout {}", branch))
    }

    fn merge(&self, branch: &str) -> Result<()> {
        self.record(format!("merge --no-ff {}", branch))
    }

    fn merge_abort(&self) -> Result<()> {
        self.record("merge-abort".to_string())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.record(format!("push {} {}", remote, branch))
    }
}
