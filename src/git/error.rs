//! Precondition errors for git-backed commands
//!
//! **`GitError`** is a typed enum for failures that stop a command before it
//! does any work: not in a repository, nothing staged, a protected branch, a
//! missing or unauthenticated `gh`. Use `.into()` to convert to
//! `anyhow::Error`; `main` downcasts it back and prints the styled `Display`.

use std::path::PathBuf;

use color_print::cformat;

use crate::path::format_path_for_display;
use crate::styling::{error_message, format_with_gutter, hint_message};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitError {
    NotInRepository,
    NoStagedChanges,
    DetachedHead {
        action: Option<String>,
    },
    /// PRs are never opened from the default branch names
    ProtectedBranch {
        branch: String,
    },
    WorktreePathExists {
        branch: String,
        path: PathBuf,
    },
    WorktreeCreationFailed {
        branch: String,
        base_branch: String,
        error: String,
    },
    GhNotInstalled,
    GhNotAuthenticated {
        stderr: String,
    },
}

impl std::error::Error for GitError {}

impl std::fmt::Display for GitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitError::NotInRepository => {
                write!(
                    f,
                    "{}\n{}",
                    error_message("Not in a git repository"),
                    hint_message(cformat!(
                        "Run from inside a repository, or create one with <bright-black>git init</>"
                    ))
                )
            }

            GitError::NoStagedChanges => {
                write!(
                    f,
                    "{}\n{}",
                    error_message("No staged changes to commit"),
                    hint_message(cformat!("Stage files with <bright-black>git add</>"))
                )
            }

            GitError::DetachedHead { action } => {
                let message = match action {
                    Some(action) => format!("Cannot {action}: not on a branch (detached HEAD)"),
                    None => "Not on a branch (detached HEAD)".to_string(),
                };
                write!(
                    f,
                    "{}\n{}",
                    error_message(&message),
                    hint_message(cformat!(
                        "To switch to a branch, run <bright-black>git switch <<branch>></>"
                    ))
                )
            }

            GitError::ProtectedBranch { branch } => {
                write!(
                    f,
                    "{}\n{}",
                    error_message(cformat!(
                        "Cannot create a PR from <bold>{branch}</>"
                    )),
                    hint_message(cformat!(
                        "Create a feature branch first: <bright-black>git switch -c <<branch>></>"
                    ))
                )
            }

            GitError::WorktreePathExists { branch, path } => {
                let path_display = format_path_for_display(path);
                write!(
                    f,
                    "{}\n{}",
                    error_message(cformat!(
                        "Directory already exists: <bold>{path_display}</>"
                    )),
                    hint_message(cformat!(
                        "Pick another name with <bright-black>--branch-name</>, or remove the directory before creating <bold>{branch}</>"
                    ))
                )
            }

            GitError::WorktreeCreationFailed {
                branch,
                base_branch,
                error,
            } => {
                let header = error_message(cformat!(
                    "Failed to create worktree for <bold>{branch}</> from <bold>{base_branch}</>"
                ));
                write!(f, "{}", format_error_block(header, error))
            }

            GitError::GhNotInstalled => {
                write!(
                    f,
                    "{}\n{}",
                    error_message(cformat!("<bold>gh</> is not installed")),
                    hint_message("Install the GitHub CLI: https://cli.github.com/")
                )
            }

            GitError::GhNotAuthenticated { stderr } => {
                let header = format!(
                    "{}\n{}",
                    error_message(cformat!("<bold>gh</> is not authenticated")),
                    hint_message(cformat!("Run <bright-black>gh auth login</>"))
                );
                write!(f, "{}", format_error_block(header, stderr))
            }
        }
    }
}

/// Format an error with header and gutter content
pub(crate) fn format_error_block(header: impl Into<String>, error: &str) -> String {
    let header = header.into();
    let trimmed = error.trim();
    if trimmed.is_empty() {
        header
    } else {
        format!("{header}\n{}", format_with_gutter(trimmed, None))
    }
}
