//! `bruh addcheat`: turn the previous shell command into a navi cheat

use std::path::{Path, PathBuf};

use color_print::cformat;

use bruh::config::{AddcheatConfig, AiConfig};
use bruh::error::BruhError;
use bruh::path::{format_path_for_display, home_dir};
use bruh::styling::{eprintln, format_with_gutter, info_message, success_message};

use crate::llm::{build_cheat_prompt, run_interactive_ai};

/// Flags for `bruh addcheat`.
pub(crate) struct AddcheatOptions {
    pub instructions: Vec<String>,
    pub cheat_directory: Option<PathBuf>,
}

pub(crate) fn handle_addcheat(
    addcheat: &AddcheatConfig,
    ai: &AiConfig,
    options: AddcheatOptions,
) -> anyhow::Result<()> {
    let cheat_dir = match options.cheat_directory {
        Some(dir) => dir,
        None => expand_tilde(&addcheat.cheat_directory),
    };
    if !cheat_dir.is_dir() {
        return Err(BruhError::CheatDirectoryMissing { path: cheat_dir }.into());
    }

    let history = history_file(addcheat.history_file.as_deref(), std::env::var("HISTFILE").ok())
        .ok_or_else(|| BruhError::HistoryUnavailable {
            path: PathBuf::from("~/.zsh_history"),
            reason: "home directory not found".into(),
        })?;
    let command = read_previous_command(&history)?;

    eprintln!("{}", info_message("Adding to cheatsheet:"));
    eprintln!("{}", format_with_gutter(&command, None));

    let prompt = build_cheat_prompt(&command, &cheat_dir, &options.instructions.join(" "))?;
    run_interactive_ai(ai, &prompt, &cheat_dir)?;

    let dir_display = format_path_for_display(&cheat_dir);
    eprintln!(
        "{}",
        success_message(cformat!("Cheatsheet session finished in <bold>{dir_display}</>"))
    );
    Ok(())
}

fn expand_tilde(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Configured file, then `$HISTFILE`, then `~/.zsh_history`.
fn history_file(configured: Option<&str>, histfile_env: Option<String>) -> Option<PathBuf> {
    if let Some(path) = configured {
        return Some(expand_tilde(path));
    }
    if let Some(path) = histfile_env.filter(|p| !p.is_empty()) {
        return Some(expand_tilde(&path));
    }
    home_dir().map(|home| home.join(".zsh_history"))
}

fn read_previous_command(path: &Path) -> anyhow::Result<String> {
    let unavailable = |reason: String| BruhError::HistoryUnavailable {
        path: path.to_path_buf(),
        reason,
    };
    let bytes = std::fs::read(path).map_err(|e| unavailable(e.to_string()))?;
    let content = String::from_utf8_lossy(&bytes);
    previous_command(&content)
        .ok_or_else(|| unavailable("fewer than two entries".into()).into())
}

/// Second-to-last non-empty history line, without any zsh extended-history
/// prefix. The last line is the `bruh addcheat` invocation itself.
pub(crate) fn previous_command(history: &str) -> Option<String> {
    let line = history
        .lines()
        .filter(|line| !line.trim().is_empty())
        .rev()
        .nth(1)?;
    let command = strip_extended_history(line).trim();
    (!command.is_empty()).then(|| command.to_string())
}

/// `: 1700000000:0;git status` -> `git status`
fn strip_extended_history(line: &str) -> &str {
    if line.starts_with(": ")
        && let Some((_, command)) = line.split_once(';')
    {
        return command;
    }
    line
}
