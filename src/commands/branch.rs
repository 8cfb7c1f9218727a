//! `bruh branch`: new worktree plus an editor

use std::path::Path;
use std::process::Command;

use color_print::cformat;

use bruh::error::BruhError;
use bruh::path::{format_path_for_display, worktree_path};
use bruh::shell_exec;
use bruh::styling::{eprintln, info_message, success_message};

use super::context::CommandEnv;

/// Flags for `bruh branch`. `None` fields fall back to git or config.
pub(crate) struct BranchOptions {
    pub from_branch: Option<String>,
    pub branch_name: Option<String>,
    pub editor: Option<String>,
    pub using_tmux: Option<bool>,
}

/// Name used when `--branch-name` is omitted.
pub(crate) fn default_branch_name(from: &str) -> String {
    format!("{from}-worktree")
}

/// Where the editor runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditorTarget {
    TmuxWindow,
    Foreground,
}

/// A tmux window only when asked for and actually inside tmux.
pub(crate) fn editor_target(using_tmux: bool, tmux_env: Option<&str>) -> EditorTarget {
    match tmux_env {
        Some(value) if using_tmux && !value.is_empty() => EditorTarget::TmuxWindow,
        _ => EditorTarget::Foreground,
    }
}

pub(crate) fn handle_branch(env: CommandEnv, options: BranchOptions) -> anyhow::Result<()> {
    let CommandEnv { repo, config } = env;

    let from = match options.from_branch {
        Some(from) => from,
        None => repo.require_current_branch("create a worktree")?,
    };
    let branch = options
        .branch_name
        .unwrap_or_else(|| default_branch_name(&from));
    let editor = options.editor.unwrap_or(config.branch.editor);
    let using_tmux = options.using_tmux.unwrap_or(config.branch.using_tmux);

    let path = worktree_path(&repo.root()?, &branch);
    let path_display = format_path_for_display(&path);

    repo.add_worktree(&path, &branch, &from)?;
    eprintln!(
        "{}",
        success_message(cformat!(
            "Created worktree for <bold>{branch}</> from <bold>{from}</> @ <bold>{path_display}</>"
        ))
    );

    let tmux_env = std::env::var("TMUX").ok();
    match editor_target(using_tmux, tmux_env.as_deref()) {
        EditorTarget::TmuxWindow => open_in_tmux(&path, &branch, &editor),
        EditorTarget::Foreground => {
            if using_tmux {
                log::debug!("TMUX not set, running editor in this terminal");
            }
            open_in_foreground(&path, &editor)
        }
    }
}

fn open_in_tmux(path: &Path, branch: &str, editor: &str) -> anyhow::Result<()> {
    let path_str = path.to_string_lossy();
    let pane = tmux(&["new-window", "-c", &path_str, "-n", branch, "-P", "-F", "#{pane_id}"])?;
    let pane = pane.trim();
    if pane.is_empty() {
        return Err(BruhError::TmuxFailed {
            error: "new-window did not report a pane id".into(),
        }
        .into());
    }
    tmux(&["send-keys", "-t", pane, editor, "Enter"])?;
    eprintln!(
        "{}",
        info_message(cformat!("Opened <bold>{editor}</> in tmux window <bold>{branch}</>"))
    );
    Ok(())
}

/// Run tmux, returning its stdout.
fn tmux(args: &[&str]) -> anyhow::Result<String> {
    let mut cmd = Command::new("tmux");
    cmd.args(args);
    let output = shell_exec::run(&mut cmd, None).map_err(|e| BruhError::TmuxFailed {
        error: e.to_string(),
    })?;
    if !output.status.success() {
        return Err(BruhError::TmuxFailed {
            error: shell_exec::combined_output(&output).trim().to_string(),
        }
        .into());
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// The editor string may carry arguments (`code --wait`), so it runs through
/// the shell. The worktree path goes in as `$1`, so it needs no escaping.
fn open_in_foreground(path: &Path, editor: &str) -> anyhow::Result<()> {
    let mut cmd = Command::new("sh");
    cmd.arg("-c")
        .arg(editor_script(editor))
        .arg("sh")
        .arg(path)
        .current_dir(path);
    let ok = shell_exec::run_interactive(&mut cmd, None).map_err(|_| BruhError::EditorFailed {
        editor: editor.to_string(),
    })?;
    if !ok {
        return Err(BruhError::EditorFailed {
            editor: editor.to_string(),
        }
        .into());
    }
    Ok(())
}

/// `sh -c` script running `editor` with the first positional argument appended.
fn editor_script(editor: &str) -> String {
    format!("{editor} \"$1\"")
}
