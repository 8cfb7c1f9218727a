use anyhow::Context;
use color_print::cformat;

use bruh::config::{AiConfig, CommitConfig};
use bruh::error::BruhError;
use bruh::git::{GitError, Repository};
use bruh::shell_exec;
use bruh::styling::{
    eprintln, format_with_gutter, println, progress_message, success_message, warning_message,
};

use super::context::CommandEnv;
use crate::llm::{
    AiTask, CommitPromptContext, build_commit_prompt, build_fix_prompt, execute_ai_command,
};

/// pre-commit runs before giving up; the AI gets a fix turn after each failure
/// except the last.
pub(crate) const MAX_CLEANUP_ATTEMPTS: usize = 5;

/// Flags for `bruh commit`.
pub(crate) struct CommitOptions {
    /// Words of the message; empty means generate one
    pub message: Vec<String>,
    /// CLI override for cleanup. None = use `cleanup-pre-commit`
    pub cleanup_pre_commit: Option<bool>,
    pub show_prompt: bool,
}

pub(crate) fn handle_commit(env: CommandEnv, options: CommitOptions) -> anyhow::Result<()> {
    let CommandEnv { repo, config } = env;

    if !repo.has_staged_changes()? {
        return Err(GitError::NoStagedChanges.into());
    }

    let user_message = options.message.join(" ");
    let user_message = user_message.trim();

    if options.show_prompt {
        let prompt = commit_prompt(&repo, &config.commit)?;
        println!("{prompt}");
        return Ok(());
    }

    let repo_name = repo.name()?;
    let cleanup = options
        .cleanup_pre_commit
        .unwrap_or_else(|| config.cleanup_enabled_for(&repo_name));
    if cleanup {
        run_cleanup(&repo, &config.ai)?;
    }

    let message = if user_message.is_empty() {
        eprintln!("{}", progress_message("Generating commit message..."));
        let prompt = commit_prompt(&repo, &config.commit)?;
        execute_ai_command(&config.ai, AiTask::CommitMessage, &prompt, repo.path())?
    } else {
        user_message.to_string()
    };

    eprintln!("{}", format_with_gutter(&format_message_for_display(&message), None));

    repo.commit(&message)?;
    let commit_hash = repo
        .run_command(&["rev-parse", "--short", "HEAD"])?
        .trim()
        .to_string();
    eprintln!(
        "{}",
        success_message(cformat!("Committed changes @ <dim>{commit_hash}</>"))
    );
    Ok(())
}

fn commit_prompt(repo: &Repository, config: &CommitConfig) -> anyhow::Result<String> {
    let git_status = repo.status_porcelain()?;
    let changed_files = repo.staged_name_status()?;
    let branch = repo.current_branch()?.unwrap_or_else(|| "HEAD".to_string());
    let repo_name = repo.name()?;
    build_commit_prompt(
        config,
        &CommitPromptContext {
            git_status: &git_status,
            changed_files: &changed_files,
            branch: &branch,
            repo: &repo_name,
        },
    )
}

/// Bold subject line, body as-is.
fn format_message_for_display(message: &str) -> String {
    let bold = anstyle::Style::new().bold();
    let mut lines = message.lines();
    let Some(subject) = lines.next() else {
        return String::new();
    };
    let mut result = format!("{bold}{subject}{bold:#}");
    for line in lines {
        result.push('\n');
        result.push_str(line);
    }
    result
}

/// Run pre-commit in the repository root, letting the AI fix failures.
fn run_cleanup(repo: &Repository, ai: &AiConfig) -> anyhow::Result<()> {
    let root = repo.root()?;
    cleanup_loop(
        |attempt| {
            eprintln!(
                "{}",
                progress_message(cformat!(
                    "Running <bold>pre-commit</> (attempt {attempt}/{MAX_CLEANUP_ATTEMPTS})..."
                ))
            );
            run_pre_commit(&root)
        },
        |output| {
            eprintln!(
                "{}",
                warning_message("pre-commit failed, asking the AI command to fix it")
            );
            eprintln!("{}", format_with_gutter(output.trim_end(), None));
            let prompt = build_fix_prompt(output)?;
            execute_ai_command(ai, AiTask::FixPreCommit, &prompt, &root)?;
            repo.stage_all()
        },
    )?;
    eprintln!("{}", success_message("pre-commit passed"));
    Ok(())
}

/// `pre-commit run --all-files`: whether it passed, and its output.
fn run_pre_commit(root: &std::path::Path) -> anyhow::Result<(bool, String)> {
    let mut cmd = std::process::Command::new("pre-commit");
    cmd.args(["run", "--all-files"]).current_dir(root);
    let output = shell_exec::run(&mut cmd, Some("cleanup"))
        .context("Failed to run pre-commit; is it installed?")?;
    Ok((output.status.success(), shell_exec::combined_output(&output)))
}

/// Drive `check` until it passes, calling `fix` between failures.
///
/// `check` gets the 1-based attempt number and runs at most
/// [`MAX_CLEANUP_ATTEMPTS`] times; the last failure is returned as
/// `BruhError::PreCommitUnresolved` without another fix.
fn cleanup_loop(
    mut check: impl FnMut(usize) -> anyhow::Result<(bool, String)>,
    mut fix: impl FnMut(&str) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    let mut attempt = 1;
    loop {
        let (passed, output) = check(attempt)?;
        if passed {
            return Ok(());
        }
        if attempt == MAX_CLEANUP_ATTEMPTS {
            return Err(BruhError::PreCommitUnresolved {
                attempts: attempt,
                output,
            }
            .into());
        }
        fix(&output)?;
        attempt += 1;
    }
}
