use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, bail};

use super::GitError;
use crate::shell_exec::run;

/// A git repository rooted at (or containing) a directory.
///
/// Every query shells out to `git` with `path` as the working directory;
/// nothing is cached.
///
/// ```no_run
/// use bruh::git::Repository;
///
/// let repo = Repository::current()?;
/// repo.ensure_repository()?;
/// let staged = repo.has_staged_changes()?;
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A repository context for the process working directory.
    pub fn current() -> anyhow::Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        Ok(Self::at(cwd))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fail with [`GitError::NotInRepository`] unless `path` is inside a work tree.
    pub fn ensure_repository(&self) -> anyhow::Result<()> {
        if self.run_command_check(&["rev-parse", "--git-dir"])? {
            Ok(())
        } else {
            Err(GitError::NotInRepository.into())
        }
    }

    /// Top-level directory of the work tree.
    pub fn root(&self) -> anyhow::Result<PathBuf> {
        let out = self.run_command(&["rev-parse", "--show-toplevel"])?;
        Ok(PathBuf::from(out.trim()))
    }

    /// Basename of the work tree root, as matched against `cleanup-pre-commit`.
    pub fn name(&self) -> anyhow::Result<String> {
        let root = self.root()?;
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("Repository root has no name: {}", root.display()))
    }

    /// Currently checked-out branch, `None` on a detached HEAD.
    pub fn current_branch(&self) -> anyhow::Result<Option<String>> {
        let out = self.run_command(&["branch", "--show-current"])?;
        let branch = out.trim();
        Ok((!branch.is_empty()).then(|| branch.to_string()))
    }

    /// Like [`current_branch`](Self::current_branch), but a detached HEAD is an error.
    pub fn require_current_branch(&self, action: &str) -> anyhow::Result<String> {
        self.current_branch()?.ok_or_else(|| {
            GitError::DetachedHead {
                action: Some(action.to_string()),
            }
            .into()
        })
    }

    /// Whether the index differs from `HEAD`.
    ///
    /// `git diff --cached --exit-code` exits non-zero when there are staged changes.
    pub fn has_staged_changes(&self) -> anyhow::Result<bool> {
        let clean = self.run_command_check(&["diff", "--cached", "--exit-code", "--quiet"])?;
        Ok(!clean)
    }

    pub fn status_porcelain(&self) -> anyhow::Result<String> {
        self.run_command(&["status", "--porcelain"])
    }

    pub fn staged_name_status(&self) -> anyhow::Result<String> {
        self.run_command(&["diff", "--cached", "--name-status"])
    }

    /// `git add .`
    pub fn stage_all(&self) -> anyhow::Result<()> {
        self.run_command(&["add", "."])?;
        Ok(())
    }

    /// Commit the index. Hooks are skipped; cleanup runs pre-commit explicitly.
    pub fn commit(&self, message: &str) -> anyhow::Result<()> {
        self.run_command(&["commit", "-m", message, "--no-verify"])?;
        Ok(())
    }

    /// Files changed on this branch since it diverged from `base`.
    pub fn branch_name_status(&self, base: &str) -> anyhow::Result<String> {
        self.run_command(&["diff", &format!("{base}...HEAD"), "--name-status"])
    }

    /// One line per commit in `base..HEAD`.
    pub fn branch_commits(&self, base: &str) -> anyhow::Result<String> {
        self.run_command(&["log", &format!("{base}..HEAD"), "--oneline"])
    }

    pub fn branch_diff_stat(&self, base: &str) -> anyhow::Result<String> {
        self.run_command(&["diff", &format!("{base}...HEAD"), "--stat"])
    }

    /// `git worktree add <path> -b <branch> <base>`
    pub fn add_worktree(&self, path: &Path, branch: &str, base: &str) -> anyhow::Result<()> {
        if path.exists() {
            return Err(GitError::WorktreePathExists {
                branch: branch.to_string(),
                path: path.to_path_buf(),
            }
            .into());
        }

        let path_str = path.to_string_lossy();
        self.run_command(&["worktree", "add", &path_str, "-b", branch, base])
            .map_err(|e| GitError::WorktreeCreationFailed {
                branch: branch.to_string(),
                base_branch: base.to_string(),
                error: e.to_string(),
            })?;
        Ok(())
    }

    fn logging_context(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(".")
            .to_string()
    }

    /// Run a git command in this repository and return its stdout.
    ///
    /// A non-zero exit is an error carrying stderr (and stdout, since some git
    /// commands report failures there).
    pub fn run_command(&self, args: &[&str]) -> anyhow::Result<String> {
        let mut cmd = Command::new("git");
        cmd.args(args);
        cmd.current_dir(&self.path);

        let output = run(&mut cmd, Some(&self.logging_context()))
            .with_context(|| format!("Failed to execute: git {}", args.join(" ")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).replace('\r', "\n");
            for line in stderr.trim().lines() {
                log::debug!("  ! {}", line);
            }
            let stdout = String::from_utf8_lossy(&output.stdout);
            let error_msg = [stderr.trim(), stdout.trim()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            bail!("{}", error_msg);
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        for line in stdout.trim().lines() {
            log::debug!("  {}", line);
        }
        Ok(stdout)
    }

    /// Run a git command and return whether it exited 0.
    ///
    /// For commands that answer through their exit code, like
    /// `git diff --cached --exit-code`.
    pub fn run_command_check(&self, args: &[&str]) -> anyhow::Result<bool> {
        let mut cmd = Command::new("git");
        cmd.args(args);
        cmd.current_dir(&self.path);

        let output = run(&mut cmd, Some(&self.logging_context()))
            .with_context(|| format!("Failed to execute: git {}", args.join(" ")))?;

        Ok(output.status.success())
    }
}
