//! Conflict marker scanner for the pre-commit hook.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{ReleaseHooksError, Result};
use crate::git::Repository;

/// Lines opening or closing a merge conflict hunk.
pub const DEFAULT_CONFLICT_PATTERN: &str = r"^(<<<<<<<|>>>>>>>) ";

/// A single line that looks like a conflict marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictMatch {
    /// Path relative to the work tree root
    pub path: PathBuf,
    /// 1-based
    pub line_number: usize,
    pub line: String,
}

pub struct ConflictScanner {
    pattern: Regex,
}

impl ConflictScanner {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            ReleaseHooksError::config(format!("Invalid conflict pattern '{}': {}", pattern, e))
        })?;
        Ok(ConflictScanner { pattern })
    }

    /// Search every tracked file present in the work tree.
    ///
    /// Files removed from the work tree and binary files are skipped.
    pub fn scan<R: Repository + ?Sized>(&self, repo: &R) -> Result<Vec<ConflictMatch>> {
        let workdir = repo.workdir()?;
        let mut matches = Vec::new();

        for relative in repo.tracked_files()? {
            let full = workdir.join(&relative);
            if !full.is_file() {
                continue;
            }

            let bytes = fs::read(&full)?;
            matches.extend(self.scan_bytes(&relative, &bytes));
        }

        Ok(matches)
    }

    /// Search one file's contents
    pub fn scan_bytes(&self, path: &Path, bytes: &[u8]) -> Vec<ConflictMatch> {
        if bytes.contains(&0) {
            return Vec::new();
        }

        let text = String::from_utf8_lossy(bytes);
        text.lines()
            .enumerate()
            .filter(|(_, line)| self.pattern.is_match(line))
            .map(|(i, line)| ConflictMatch {
                path: path.to_path_buf(),
                line_number: i + 1,
                line: line.to_string(),
            })
            .collect()
    }
}

/// Group matches by file, keeping scan order
pub fn files(matches: &[ConflictMatch]) -> Vec<(PathBuf, Vec<&ConflictMatch>)> {
    let mut grouped: Vec<(PathBuf, Vec<&ConflictMatch>)> = Vec::new();

    for m in matches {
        match grouped.last_mut() {
            Some((path, entries)) if *path == m.path => entries.push(m),
            _ => grouped.push((m.path.clone(), vec![m])),
        }
    }

    grouped
}
