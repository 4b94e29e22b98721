//! Repository inspection
//!
//! Version resolution only needs a handful of facts about the checked out head.
//! The [RepositoryInspector] trait supplies them; implementations are
//!
//! - [repository::Git2Inspector]: reads a real repository through the `git2` crate
//! - [mock::MockInspector]: canned answers for tests
//!
//! ```rust
//! # use git_versioning::git::RepositoryInspector;
//! # fn example<R: RepositoryInspector>(repo: &R) -> git_versioning::Result<()> {
//! let commit = repo.head_commit()?;
//! if let Some(branch) = repo.head_branch()? {
//!     println!("{} on {}", commit, branch);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockInspector;
pub use repository::Git2Inspector;

use crate::error::Result;

/// Read-only view of a repository's head
///
/// All implementors must be `Send + Sync` so one inspector can serve
/// resolutions from several threads. Errors from the underlying repository are
/// returned unchanged; nothing is retried.
pub trait RepositoryInspector: Send + Sync {
    /// Full id of the commit HEAD points to
    fn head_commit(&self) -> Result<String>;

    /// Name of the checked out branch, `None` when HEAD is detached
    fn head_branch(&self) -> Result<Option<String>>;

    /// Names of all tags pointing exactly at the head commit, sorted by name
    fn head_tags(&self) -> Result<Vec<String>>;

    /// Whether the working tree has no modified, staged or untracked files
    fn is_clean(&self) -> Result<bool>;

    /// Human readable location of the repository
    fn location(&self) -> String;
}
