//! Run one tool descriptor and report its outcome

use std::path::Path;
use std::process::Command;

use color_print::cformat;

use super::tool::{ToolDescriptor, ToolOutcome};
use crate::shell_exec;
use crate::styling::{
    eprintln, error_message, format_with_gutter, hint_message, progress_message,
    success_message, warning_message,
};

/// What happened when a tool ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRun {
    pub name: &'static str,
    pub outcome: ToolOutcome,
    /// Combined stdout and stderr, or the spawn error
    pub output: String,
}

/// Run `tool` in `root` and classify the result.
///
/// Nothing is printed; see [`report`].
pub fn run_tool(tool: &ToolDescriptor, root: &Path, verbose: bool) -> ToolRun {
    if !shell_exec::is_installed(tool.probe) {
        return ToolRun {
            name: tool.name,
            outcome: ToolOutcome::Unavailable,
            output: String::new(),
        };
    }

    let mut cmd = Command::new(tool.program);
    cmd.args(tool.args(verbose)).current_dir(root);

    let (outcome, output) = match shell_exec::run(&mut cmd, Some(tool.name)) {
        Ok(output) => {
            let text = shell_exec::combined_output(&output);
            (tool.policy.classify(output.status.code(), &text), text)
        }
        Err(e) => (
            ToolOutcome::ExecutionError,
            format!("Failed to run {}: {e}", shell_exec::format_command(&cmd)),
        ),
    };

    log::debug!("{} finished: {}", tool.name, <&str>::from(outcome));
    ToolRun {
        name: tool.name,
        outcome,
        output,
    }
}

/// Print the outcome of a run to stderr.
///
/// Output is shown for failures always and for clean runs only when verbose.
pub fn report(tool: &ToolDescriptor, run: &ToolRun, verbose: bool) {
    let name = tool.name;
    match run.outcome {
        ToolOutcome::Unavailable => {
            eprintln!(
                "{}",
                warning_message(cformat!("<bold>{name}</> is not installed, skipping"))
            );
            eprintln!("{}", hint_message(format!("Install: {}", tool.install_hint)));
        }
        ToolOutcome::Clean => {
            eprintln!(
                "{}",
                success_message(cformat!("No {} issues found by <bold>{name}</>", tool.category))
            );
            if verbose {
                print_output(&run.output);
            }
        }
        ToolOutcome::IssuesFound => {
            eprintln!(
                "{}",
                error_message(cformat!("<bold>{name}</> found {} issues", tool.category))
            );
            print_output(&run.output);
        }
        ToolOutcome::ExecutionError => {
            eprintln!("{}", error_message(cformat!("<bold>{name}</> failed to run")));
            print_output(&run.output);
        }
    }
}

/// Announce, run and report one tool.
pub fn run_and_report(tool: &ToolDescriptor, root: &Path, verbose: bool) -> ToolRun {
    let name = tool.name;
    eprintln!(
        "{}",
        progress_message(cformat!("Running <bold>{name}</> ({})", tool.category))
    );
    let run = run_tool(tool, root, verbose);
    report(tool, &run, verbose);
    run
}

fn print_output(output: &str) {
    if !output.trim().is_empty() {
        eprintln!("{}", format_with_gutter(output.trim_end(), None));
    }
}
