use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{self, Stdio};

use anyhow::Context;
use bruh::config::{AiConfig, CommitConfig};
use bruh::error::BruhError;
use bruh::path::format_path_for_display;
use bruh::shell_exec;
use minijinja::Environment;

/// What the AI command is asked to do; each purpose grants different tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AiTask {
    CommitMessage,
    CreatePr,
    /// Edit files until pre-commit passes; output is not used
    FixPreCommit,
}

impl AiTask {
    fn flags(self) -> &'static [&'static str] {
        match self {
            AiTask::CommitMessage => &["--print", "--allowedTools", "Bash(git:*)"],
            AiTask::CreatePr => &["--print", "--allowedTools", "Bash(gh:*)"],
            AiTask::FixPreCommit => &[
                "--print",
                "--dangerously-skip-permissions",
                "--allowedTools",
                "Bash(*),Read(*),Edit(*),Glob(*),Grep(*),MultiEdit(*)",
            ],
        }
    }

    fn requires_output(self) -> bool {
        !matches!(self, AiTask::FixPreCommit)
    }
}

/// Format a command and its arguments into a display string
fn format_command_display(command: &str, args: &[String]) -> String {
    if args.is_empty() {
        command.to_string()
    } else {
        format!("{} {}", command, args.join(" "))
    }
}

const DEFAULT_COMMIT_TEMPLATE: &str = r#"Write a commit message for the staged changes below.

<format>
- Conventional commit style: "type(scope): subject"
- Short subject line, optional body after a blank line
- Output only the commit message, no quotes, code blocks, or commentary
- Do not mention that the message was AI-generated
</format>

<context>
Repository: {{ repo }}
Branch: {{ branch }}
</context>

<git_status>
{{ git_status }}
</git_status>

<changed_files>
{{ changed_files }}
</changed_files>
"#;

const PR_TEMPLATE: &str = r#"Open a pull request from {{ branch }} into {{ base_branch }} with the gh CLI.

{{ instructions }}

<changed_files>
{{ changed_files }}
</changed_files>

<commits>
{{ commits }}
</commits>

<diffstat>
{{ diff_stat }}
</diffstat>

<requirements>
{% if title %}- Use exactly this title: {{ title }}
{% else %}- Write a concise, descriptive title
{% endif %}- Markdown body with a Summary section (2-3 bullets) and a Test plan section with a checklist
- Run `gh pr create --base {{ base_branch }}` yourself; do not just print the command
- Print the URL of the created pull request
</requirements>
"#;

const FIX_TEMPLATE: &str = r#"pre-commit failed in the current directory. Fix every reported issue in place.
Only fix the issues; do not explain what you are doing.

<pre_commit_output>
{{ output }}
</pre_commit_output>
"#;

const CHEAT_TEMPLATE: &str = r##"Add this command to the most fitting navi cheatsheet in {{ cheat_dir }}:

{{ command }}

- Reuse an existing .cheat file whose topic matches; otherwise create a new, well-named one
- Cheatsheets start with a "% tag, tag" line; each entry is a "# description" line followed by the command
- Replace parameters with <variable> placeholders and add "$ variable: <shell command>" suggestion lines where useful
- Keep the entry concise and follow the formatting of the surrounding entries
- Work autonomously, without asking for confirmation
{% if instructions %}
Additional instructions from the user: {{ instructions }}
{% endif %}"##;

/// Run the AI command non-interactively with the prompt on stdin.
///
/// This is the only place prompts are sent: the command gets the task's flags
/// followed by `ai.args`. Returns trimmed stdout.
pub(crate) fn execute_ai_command(
    ai: &AiConfig,
    task: AiTask,
    prompt: &str,
    cwd: &Path,
) -> anyhow::Result<String> {
    let mut args: Vec<String> = task.flags().iter().map(|s| s.to_string()).collect();
    args.extend(ai.args.iter().cloned());
    let display = format_command_display(&ai.command, &args);

    let mut cmd = process::Command::new(&ai.command);
    cmd.args(&args)
        .current_dir(cwd)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    log::debug!("$ {display}");
    log::debug!("  Prompt (stdin):");
    for line in prompt.lines() {
        log::debug!("    {}", line);
    }

    let failed = |error: String| BruhError::AiCommandFailed {
        command: ai.command.clone(),
        error,
    };

    let mut child = cmd.spawn().map_err(|e| failed(format!("{display}: {e}")))?;

    // Commands that exit without reading stdin close the pipe early
    if let Some(mut stdin) = child.stdin.take()
        && let Err(e) = stdin.write_all(prompt.as_bytes())
        && e.kind() != std::io::ErrorKind::BrokenPipe
    {
        return Err(e).context("Failed to write prompt to AI command stdin");
    }

    let output = child
        .wait_with_output()
        .context("Failed to wait for AI command")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let detail = if stderr.trim().is_empty() { stdout } else { stderr };
        return Err(failed(detail.trim().to_string()).into());
    }

    let message = String::from_utf8_lossy(&output.stdout).trim().to_owned();
    if message.is_empty() && task.requires_output() {
        return Err(BruhError::AiEmptyResponse {
            command: ai.command.clone(),
        }
        .into());
    }

    Ok(message)
}

/// Start an interactive AI session with the prompt as an argument, stdio
/// inherited, in `cwd`.
pub(crate) fn run_interactive_ai(ai: &AiConfig, prompt: &str, cwd: &Path) -> anyhow::Result<()> {
    let mut cmd = process::Command::new(&ai.command);
    cmd.arg("--dangerously-skip-permissions")
        .args(&ai.args)
        .arg(prompt)
        .current_dir(cwd);

    let ok = shell_exec::run_interactive(&mut cmd, None).map_err(|e| BruhError::AiCommandFailed {
        command: ai.command.clone(),
        error: e.to_string(),
    })?;
    if !ok {
        return Err(BruhError::AiCommandFailed {
            command: ai.command.clone(),
            error: "interactive session exited with an error".into(),
        }
        .into());
    }
    Ok(())
}

/// Load template from inline, file, or default
fn load_template(inline: Option<&String>, file: Option<&String>, default: &str) -> anyhow::Result<String> {
    match (inline, file) {
        (Some(inline), _) => Ok(inline.clone()),
        (None, Some(path)) => {
            let expanded_path = PathBuf::from(shellexpand::tilde(path).as_ref());
            std::fs::read_to_string(&expanded_path).with_context(|| {
                format!(
                    "Failed to read template-file '{}'",
                    format_path_for_display(&expanded_path)
                )
            })
        }
        (None, None) => Ok(default.to_string()),
    }
}

fn render(template: &str, ctx: minijinja::Value) -> anyhow::Result<String> {
    if template.trim().is_empty() {
        anyhow::bail!("Prompt template is empty");
    }
    let env = Environment::new();
    let tmpl = env.template_from_str(template)?;
    Ok(tmpl.render(ctx)?)
}

/// Inputs to the commit-message prompt.
pub(crate) struct CommitPromptContext<'a> {
    pub git_status: &'a str,
    pub changed_files: &'a str,
    pub branch: &'a str,
    pub repo: &'a str,
}

pub(crate) fn build_commit_prompt(
    config: &CommitConfig,
    context: &CommitPromptContext<'_>,
) -> anyhow::Result<String> {
    let template = load_template(
        config.template.as_ref(),
        config.template_file.as_ref(),
        DEFAULT_COMMIT_TEMPLATE,
    )?;
    render(
        &template,
        minijinja::context! {
            git_status => context.git_status.trim_end(),
            changed_files => context.changed_files.trim_end(),
            branch => context.branch,
            repo => context.repo,
        },
    )
}

/// Inputs to the PR prompt.
pub(crate) struct PrPromptContext<'a> {
    pub branch: &'a str,
    pub base_branch: &'a str,
    pub changed_files: &'a str,
    pub commits: &'a str,
    pub diff_stat: &'a str,
    pub title: Option<&'a str>,
    pub instructions: &'a str,
}

pub(crate) fn build_pr_prompt(context: &PrPromptContext<'_>) -> anyhow::Result<String> {
    render(
        PR_TEMPLATE,
        minijinja::context! {
            branch => context.branch,
            base_branch => context.base_branch,
            changed_files => context.changed_files.trim_end(),
            commits => context.commits.trim_end(),
            diff_stat => context.diff_stat.trim_end(),
            title => context.title,
            instructions => context.instructions,
        },
    )
}

pub(crate) fn build_fix_prompt(output: &str) -> anyhow::Result<String> {
    render(
        FIX_TEMPLATE,
        minijinja::context! { output => output.trim_end() },
    )
}

pub(crate) fn build_cheat_prompt(
    command: &str,
    cheat_dir: &Path,
    instructions: &str,
) -> anyhow::Result<String> {
    render(
        CHEAT_TEMPLATE,
        minijinja::context! {
            command => command,
            cheat_dir => cheat_dir.display().to_string(),
            instructions => instructions,
        },
    )
}

/// First output line that looks like a GitHub PR URL, else the whole output.
pub(crate) fn extract_pr_url(output: &str) -> &str {
    output
        .lines()
        .find(|line| line.contains("github.com") && line.contains("/pull/"))
        .map(str::trim)
        .unwrap_or(output)
}
