//! `bruh pr create`

use std::process::Command;

use anyhow::Context;
use color_print::cformat;

use bruh::git::{GitError, Repository, is_protected_branch};
use bruh::shell_exec;
use bruh::styling::{
    eprintln, error_message, format_with_gutter, hint_message, info_message, println,
    progress_message, success_message,
};

use super::context::CommandEnv;
use crate::llm::{AiTask, PrPromptContext, build_pr_prompt, execute_ai_command, extract_pr_url};

/// Base used when `gh` cannot tell us the default branch.
const FALLBACK_BASE: &str = "main";

/// Flags for `bruh pr create`.
pub(crate) struct PrOptions {
    pub base: Option<String>,
    pub title: Option<String>,
    pub prompt: String,
}

pub(crate) fn handle_pr_create(env: CommandEnv, options: PrOptions) -> anyhow::Result<()> {
    let branch = env.require_branch("create a PR")?;
    let CommandEnv { repo, config } = env;

    // Nothing but git may run before this check
    if is_protected_branch(&branch) {
        return Err(GitError::ProtectedBranch { branch }.into());
    }

    let Some(instructions) = config.pr.prompt(&options.prompt) else {
        let names = config.pr.prompt_names().join(", ");
        let name = &options.prompt;
        anyhow::bail!(
            "{}\n{}",
            error_message(cformat!("No PR prompt named <bold>{name}</>")),
            hint_message(format!("Configured prompts: {names}"))
        );
    };

    ensure_gh_ready(&repo)?;

    let base = match options.base {
        Some(base) => base,
        None => default_base_branch(&repo),
    };
    let diff_base = resolve_diff_base(&repo, &base)?;

    let changed_files = repo.branch_name_status(&diff_base)?;
    let commits = repo.branch_commits(&diff_base)?;
    let diff_stat = repo.branch_diff_stat(&diff_base)?;

    let prompt = build_pr_prompt(&PrPromptContext {
        branch: &branch,
        base_branch: &base,
        changed_files: &changed_files,
        commits: &commits,
        diff_stat: &diff_stat,
        title: options.title.as_deref(),
        instructions,
    })?;

    eprintln!(
        "{}",
        progress_message(cformat!(
            "Creating pull request for <bold>{branch}</> into <bold>{base}</>..."
        ))
    );
    let response = execute_ai_command(&config.ai, AiTask::CreatePr, &prompt, repo.path())?;

    eprintln!("{}", info_message("Generated PR description:"));
    eprintln!("{}", format_with_gutter(&response, None));

    let url = extract_pr_url(&response);
    eprintln!("{}", success_message("Successfully created pull request"));
    println!("{url}");
    Ok(())
}

fn gh(repo: &Repository, args: &[&str]) -> anyhow::Result<std::process::Output> {
    let mut cmd = Command::new("gh");
    cmd.args(args).current_dir(repo.path());
    shell_exec::run(&mut cmd, None).with_context(|| format!("Failed to execute: gh {}", args.join(" ")))
}

/// `gh` must be on PATH and logged in.
fn ensure_gh_ready(repo: &Repository) -> anyhow::Result<()> {
    if !shell_exec::is_installed("gh") {
        return Err(GitError::GhNotInstalled.into());
    }
    let output = gh(repo, &["auth", "status"])?;
    if !output.status.success() {
        return Err(GitError::GhNotAuthenticated {
            stderr: shell_exec::combined_output(&output).trim().to_string(),
        }
        .into());
    }
    Ok(())
}

/// The repository's default branch according to GitHub, else `main`.
fn default_base_branch(repo: &Repository) -> String {
    let name = gh(
        repo,
        &[
            "repo",
            "view",
            "--json",
            "defaultBranchRef",
            "-q",
            ".defaultBranchRef.name",
        ],
    )
    .ok()
    .filter(|output| output.status.success())
    .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
    .filter(|name| !name.is_empty());

    name.unwrap_or_else(|| {
        log::debug!("Could not read default branch from gh, using {FALLBACK_BASE}");
        FALLBACK_BASE.to_string()
    })
}

/// Ref to diff against: the local base branch, or its `origin/` counterpart
/// when only the remote one exists.
fn resolve_diff_base(repo: &Repository, base: &str) -> anyhow::Result<String> {
    let exists = |rev: &str| repo.run_command_check(&["rev-parse", "--verify", "--quiet", rev]);
    if exists(base)? {
        return Ok(base.to_string());
    }
    let remote = format!("origin/{base}");
    if exists(&remote)? {
        return Ok(remote);
    }
    anyhow::bail!(
        "{}",
        error_message(cformat!("Base branch <bold>{base}</> not found locally or on origin"))
    )
}
