//! Git operations and repository queries

mod error;
mod repository;

pub use error::GitError;
pub(crate) use error::format_error_block;
pub use repository::Repository;

/// Branches `bruh pr create` refuses to open a PR from.
pub const PROTECTED_BRANCHES: [&str; 2] = ["main", "master"];

/// Whether a PR must not be opened from `branch`.
pub fn is_protected_branch(branch: &str) -> bool {
    PROTECTED_BRANCHES.contains(&branch)
}
