use std::path::{Path, PathBuf};

/// Get the user's home directory.
///
/// Uses the `home` crate (`$HOME` on Unix, `USERPROFILE` on Windows).
pub fn home_dir() -> Option<PathBuf> {
    home::home_dir()
}

/// Format a filesystem path for user-facing output.
///
/// Replaces the home directory prefix with `~`. Paths outside home are
/// returned unchanged.
pub fn format_path_for_display(path: &Path) -> String {
    if let Some(home) = home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }

        let mut display_path = PathBuf::from("~");
        display_path.push(stripped);
        return display_path.display().to_string();
    }

    path.display().to_string()
}

/// Make a branch name usable as a single path component.
///
/// `feature/login` becomes `feature-login`.
pub fn sanitize_for_path(branch: &str) -> String {
    branch.replace(['/', '\\'], "-")
}

/// Location of a new worktree: a sibling of the repository root named
/// `<repo>-<branch>`.
///
/// A root without a parent (`/`) places the worktree under the root itself.
pub fn worktree_path(repo_root: &Path, branch: &str) -> PathBuf {
    let repo_name = repo_root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "repo".to_string());
    let parent = repo_root.parent().unwrap_or(repo_root);
    parent.join(format!("{repo_name}-{}", sanitize_for_path(branch)))
}
