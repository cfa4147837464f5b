//! Read-only access to git metadata
//!
//! This module provides a trait-based abstraction over the handful of git
//! queries version resolution needs, so the decision procedure can run
//! against a real repository or an in-memory one.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations are:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! # Usage
//!
//! ```rust
//! # use gitversion::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let head = repo.resolve_head()?;
//! for (name, target) in repo.tags()? {
//!     if target == head {
//!         println!("HEAD is tagged {}", name);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;

/// Git queries needed to derive a version
///
/// Implementations never modify the repository.
///
/// ## Ordering
///
/// [Repository::tags] and [Repository::local_branches] return entries in the
/// order the resolver should consider them; the first qualifying entry wins.
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Failures to read metadata
/// should surface as [crate::error::GitVersionError::RepositoryAccess] or
/// [crate::error::GitVersionError::Git].
pub trait Repository {
    /// Resolve `HEAD` to the commit it points at
    ///
    /// Fails when HEAD cannot be resolved, e.g. in a repository without commits.
    fn resolve_head(&self) -> Result<Oid>;

    /// All tags with the commit each one points at
    ///
    /// Annotated tags are peeled to their commit. Tags that do not point at a
    /// commit are left out.
    fn tags(&self) -> Result<Vec<(String, Oid)>>;

    /// Name of the checked-out branch
    ///
    /// Returns the short branch name (e.g. `feature/foo`), or the full hex id
    /// of the HEAD commit when HEAD is detached.
    fn current_branch_name(&self) -> Result<String>;

    /// Whether HEAD points directly at a commit rather than a branch
    fn is_head_detached(&self) -> Result<bool>;

    /// All local branches (`refs/heads/*`) with their tip commits, as short names
    fn local_branches(&self) -> Result<Vec<(String, Oid)>>;

    /// Whether `commit` is reachable from `tip`
    ///
    /// A commit counts as merged into itself.
    fn is_merged_into(&self, commit: Oid, tip: Oid) -> Result<bool>;
}
