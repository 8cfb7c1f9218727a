use bruh::config::UserConfig;
use bruh::git::Repository;

/// Shared execution context for handlers that operate on the repository the
/// user is standing in.
///
/// Centralizes the "current repo + config" setup so `branch`, `commit` and
/// `pr` fail the same way outside a repository.
pub(crate) struct CommandEnv {
    pub repo: Repository,
    pub config: UserConfig,
}

impl CommandEnv {
    /// Resolve the repository at the working directory.
    ///
    /// Fails with `GitError::NotInRepository` before any other work.
    pub fn for_current_repo(config: UserConfig) -> anyhow::Result<Self> {
        let repo = Repository::current()?;
        repo.ensure_repository()?;
        Ok(Self { repo, config })
    }

    /// Current branch, or a detached-HEAD error naming `action`.
    pub fn require_branch(&self, action: &str) -> anyhow::Result<String> {
        self.repo.require_current_branch(action)
    }
}
