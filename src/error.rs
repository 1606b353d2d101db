use thiserror::Error;

/// Unified error type for release-hooks operations
#[derive(Error, Debug)]
pub enum ReleaseHooksError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Branch error: {0}")]
    Branch(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Invalid manifest JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-hooks
pub type Result<T> = std::result::Result<T, ReleaseHooksError>;

impl ReleaseHooksError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseHooksError::Config(msg.into())
    }

    /// Create a branch error with context
    pub fn branch(msg: impl Into<String>) -> Self {
        ReleaseHooksError::Branch(msg.into())
    }

    /// Create a repository state error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        ReleaseHooksError::Repository(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        ReleaseHooksError::Manifest(msg.into())
    }

    /// Create a command error with context
    pub fn command(msg: impl Into<String>) -> Self {
        ReleaseHooksError::Command(msg.into())
    }
}
