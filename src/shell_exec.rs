//! External process execution
//!
//! Every external program bruh talks to (`git`, `gh`, `tmux`, the AI command,
//! scanners) is spawned through this module so that invocations are logged
//! and timed in one place.

use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::Instant;

/// Execute a command with timing and debug logging.
///
/// This is the **only** way to run external commands that capture output.
/// Interactive commands (editor, AI session) use [`run_interactive`].
///
/// ```text
/// $ git status [my-repo]                 # with context
/// $ gh auth status                       # without context
/// [bruh-trace] context=my-repo cmd="..." dur=12.3ms ok=true
/// ```
///
/// The `context` parameter is typically the repository name for git commands, or
/// `None` for standalone CLI tools.
pub fn run(cmd: &mut Command, context: Option<&str>) -> std::io::Result<Output> {
    let cmd_str = format_command(cmd);

    match context {
        Some(ctx) => log::debug!("$ {} [{}]", cmd_str, ctx),
        None => log::debug!("$ {}", cmd_str),
    }

    let t0 = Instant::now();
    let result = cmd.output();
    trace(&cmd_str, context, t0, result.as_ref().map(|o| o.status.success()));

    result
}

/// Execute a command with inherited stdio, waiting for it to finish.
///
/// Returns whether the command exited successfully.
pub fn run_interactive(cmd: &mut Command, context: Option<&str>) -> std::io::Result<bool> {
    let cmd_str = format_command(cmd);

    match context {
        Some(ctx) => log::debug!("$ {} [{}] (interactive)", cmd_str, ctx),
        None => log::debug!("$ {} (interactive)", cmd_str),
    }

    let t0 = Instant::now();
    let result = cmd.status().map(|status| status.success());
    trace(&cmd_str, context, t0, result.as_ref().copied());

    result
}

fn trace(cmd_str: &str, context: Option<&str>, t0: Instant, result: Result<bool, &std::io::Error>) {
    let duration_ms = t0.elapsed().as_secs_f64() * 1000.0;
    let prefix = match context {
        Some(ctx) => format!("[bruh-trace] context={ctx} "),
        None => "[bruh-trace] ".to_string(),
    };
    match result {
        Ok(ok) => log::debug!("{prefix}cmd=\"{cmd_str}\" dur={duration_ms:.1}ms ok={ok}"),
        Err(e) => log::debug!("{prefix}cmd=\"{cmd_str}\" dur={duration_ms:.1}ms err=\"{e}\""),
    }
}

/// Render a command as `program arg1 arg2` for logs and error messages.
///
/// Arguments are shell-quoted so a logged command can be pasted back into a
/// terminal.
pub fn format_command(cmd: &Command) -> String {
    let program = cmd.get_program().to_string_lossy();
    let args: Vec<String> = cmd
        .get_args()
        .map(|a| shell_escape::unix::escape(a.to_string_lossy()).into_owned())
        .collect();
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// Resolve an executable on `PATH`.
pub fn find_executable(program: &str) -> Option<PathBuf> {
    match which::which(program) {
        Ok(path) => Some(path),
        Err(e) => {
            log::debug!("{program} not found on PATH: {e}");
            None
        }
    }
}

/// Whether an executable is resolvable on `PATH`.
pub fn is_installed(program: &str) -> bool {
    find_executable(program).is_some()
}

/// Stdout followed by stderr, decoded lossily.
///
/// Tools write findings to either stream, so both are surfaced together.
pub fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    match (stdout.trim().is_empty(), stderr.trim().is_empty()) {
        (true, true) => String::new(),
        (false, true) => stdout.into_owned(),
        (true, false) => stderr.into_owned(),
        (false, false) => format!("{}\n{}", stdout.trim_end(), stderr),
    }
}
