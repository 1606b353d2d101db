//! Git operations abstraction layer
//!
//! Workflows depend on the [Repository] trait rather than a concrete
//! implementation so they can be driven by a mock in tests.
//!
//! - [repository::Git2Repository]: libgit2 for queries, the `git` CLI for
//!   checkout, merge and push
//! - [mock::MockRepository]: an in-memory implementation for testing

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::path::PathBuf;

use crate::error::Result;

/// Common git operation trait for abstraction
///
/// All implementors must be `Send + Sync`. Implementations map underlying
/// errors to [crate::error::ReleaseHooksError] variants.
pub trait Repository: Send + Sync {
    /// Root of the work tree
    fn workdir(&self) -> Result<PathBuf>;

    /// Short name of the branch HEAD points to (`git symbolic-ref --short HEAD`).
    ///
    /// Fails on a detached HEAD. An unborn branch still has a name.
    fn current_branch(&self) -> Result<String>;

    /// Paths of all files in the index, relative to the work tree root
    fn tracked_files(&self) -> Result<Vec<PathBuf>>;

    /// True when no tracked file has staged or unstaged changes
    fn is_clean(&self) -> Result<bool>;

    /// URL of a remote, `None` if the remote is not configured
    fn remote_url(&self, remote: &str) -> Result<Option<String>>;

    /// Set `core.hooksPath` in the repository config
    fn set_hooks_path(&self, path: &str) -> Result<()>;

    fn checkout(&self, branch: &str) -> Result<()>;

    /// Merge the tip of local branch `branch` into the current branch with a
    /// merge commit
    fn merge(&self, branch: &str) -> Result<()>;

    fn merge_abort(&self) -> Result<()>;

    fn push(&self, remote: &str, branch: &str) -> Result<()>;
}

/// Repository name from a remote URL.
///
/// Handles `https://host/org/repo.git`, `git@host:org/repo.git` and local paths.
pub fn repository_name_from_url(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let last = trimmed.rsplit(|c: char| matches!(c, '/' | ':' | '\\')).next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_name_https() {
        assert_eq!(
            repository_name_from_url("https://github.com/acme/widget.git").as_deref(),
            Some("widget")
        );
        assert_eq!(
            repository_name_from_url("https://github.com/acme/widget/").as_deref(),
            Some("widget")
        );
    }

    #[test]
    fn test_repository_name_scp_style() {
        assert_eq!(
            repository_name_from_url("git@github.com:acme/widget.git").as_deref(),
            Some("widget")
        );
        assert_eq!(
            repository_name_from_url("git@host:widget.git").as_deref(),
            Some("widget")
        );
    }

    #[test]
    fn test_repository_name_empty() {
        assert_eq!(repository_name_from_url(""), None);
        assert_eq!(repository_name_from_url("https://host/.git"), None);
    }
}
