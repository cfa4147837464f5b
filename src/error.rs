use thiserror::Error;

/// Unified error type for gitversion operations
#[derive(Error, Debug)]
pub enum GitVersionError {
    #[error("Repository access error: {0}")]
    RepositoryAccess(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in gitversion
pub type Result<T> = std::result::Result<T, GitVersionError>;

impl GitVersionError {
    /// Create a repository access error with context
    pub fn repository_access(msg: impl Into<String>) -> Self {
        GitVersionError::RepositoryAccess(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitVersionError::Config(msg.into())
    }

    /// Whether this error came from reading the repository metadata.
    pub fn is_repository_access(&self) -> bool {
        matches!(
            self,
            GitVersionError::RepositoryAccess(_) | GitVersionError::Git(_)
        )
    }
}
