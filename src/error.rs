//! Errors from external tools: scanners, the AI command, pre-commit, the editor
//!
//! Like [`GitError`](crate::git::GitError), each variant renders itself with
//! an error line and an optional hint, and `main` downcasts to print it.

use std::path::PathBuf;

use color_print::cformat;

use crate::git::format_error_block;
use crate::path::format_path_for_display;
use crate::styling::{error_message, hint_message};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BruhError {
    /// One or more scanners reported issues or could not run
    ScanFailed { failed: Vec<String> },
    /// The AI command could not be spawned or exited non-zero
    AiCommandFailed { command: String, error: String },
    /// The AI command succeeded but printed nothing
    AiEmptyResponse { command: String },
    /// `pre-commit run --all-files` still failing after every attempt
    PreCommitUnresolved { attempts: usize, output: String },
    CheatDirectoryMissing { path: PathBuf },
    /// No usable entry in the shell history file
    HistoryUnavailable { path: PathBuf, reason: String },
    EditorFailed { editor: String },
    TmuxFailed { error: String },
}

impl std::error::Error for BruhError {}

impl std::fmt::Display for BruhError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BruhError::ScanFailed { failed } => {
                let count = failed.len();
                let noun = if count == 1 { "tool" } else { "tools" };
                let list = failed.join(", ");
                write!(
                    f,
                    "{}",
                    error_message(cformat!("Scan failed: {count} {noun} reported problems (<bold>{list}</>)"))
                )
            }

            BruhError::AiCommandFailed { command, error } => {
                let header = error_message(cformat!("AI command <bold>{command}</> failed"));
                write!(f, "{}", format_error_block(header, error))
            }

            BruhError::AiEmptyResponse { command } => {
                write!(
                    f,
                    "{}\n{}",
                    error_message(cformat!("AI command <bold>{command}</> returned an empty response")),
                    hint_message(cformat!(
                        "Check the command runs on its own, e.g. <bright-black>echo hi | {command} --print</>"
                    ))
                )
            }

            BruhError::PreCommitUnresolved { attempts, output } => {
                let header = format!(
                    "{}\n{}",
                    error_message(cformat!(
                        "pre-commit still failing after <bold>{attempts}</> attempts"
                    )),
                    hint_message(cformat!(
                        "Fix the remaining issues by hand and run <bright-black>pre-commit run --all-files</>"
                    ))
                );
                write!(f, "{}", format_error_block(header, output))
            }

            BruhError::CheatDirectoryMissing { path } => {
                let path_display = format_path_for_display(path);
                write!(
                    f,
                    "{}\n{}",
                    error_message(cformat!(
                        "Cheat directory does not exist: <bold>{path_display}</>"
                    )),
                    hint_message(cformat!(
                        "Create it, or pass another with <bright-black>--cheat-directory</>"
                    ))
                )
            }

            BruhError::HistoryUnavailable { path, reason } => {
                let path_display = format_path_for_display(path);
                write!(
                    f,
                    "{}",
                    error_message(cformat!(
                        "No command found in <bold>{path_display}</>: {reason}"
                    ))
                )
            }

            BruhError::EditorFailed { editor } => {
                write!(
                    f,
                    "{}",
                    error_message(cformat!("Editor <bold>{editor}</> exited with an error"))
                )
            }

            BruhError::TmuxFailed { error } => {
                let header = error_message(cformat!("<bold>tmux</> failed"));
                write!(f, "{}", format_error_block(header, error))
            }
        }
    }
}
