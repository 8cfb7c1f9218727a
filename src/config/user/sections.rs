//! Configuration section structs, one per subcommand plus the AI command.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Instructions used by `bruh pr create` when no `--prompt` is given.
pub const DEFAULT_PR_PROMPT: &str =
    "Based on the following git changes, create a PR. Execute the gh pr create command directly.";

/// Name of the PR prompt used when `--prompt` is omitted.
pub const DEFAULT_PR_PROMPT_NAME: &str = "default";

/// `branch:` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BranchConfig {
    /// Open the editor in a new tmux window when running inside tmux
    #[serde(alias = "using-tmux")]
    pub using_tmux: bool,

    /// Program launched in the new worktree
    pub editor: String,
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            using_tmux: true,
            editor: "nvim".to_string(),
        }
    }
}

/// `pr:` section
///
/// `prompts` maps a name (selected with `--prompt`) to extra instructions for
/// the AI. `default` always resolves, falling back to [`DEFAULT_PR_PROMPT`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PrConfig {
    pub prompts: BTreeMap<String, String>,
}

impl Default for PrConfig {
    fn default() -> Self {
        Self {
            prompts: BTreeMap::from([(
                DEFAULT_PR_PROMPT_NAME.to_string(),
                DEFAULT_PR_PROMPT.to_string(),
            )]),
        }
    }
}

impl PrConfig {
    /// Instructions for the named prompt.
    pub fn prompt(&self, name: &str) -> Option<&str> {
        match self.prompts.get(name) {
            Some(prompt) => Some(prompt.as_str()),
            None if name == DEFAULT_PR_PROMPT_NAME => Some(DEFAULT_PR_PROMPT),
            None => None,
        }
    }

    /// Prompt names, for error hints.
    pub fn prompt_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.prompts.keys().map(String::as_str).collect();
        if !self.prompts.contains_key(DEFAULT_PR_PROMPT_NAME) {
            names.insert(0, DEFAULT_PR_PROMPT_NAME);
        }
        names
    }
}

/// `ai:` section
///
/// The command receives prompts on stdin (except `addcheat`, which starts an
/// interactive session). `args` are appended to every invocation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            command: "claude".to_string(),
            args: Vec::new(),
        }
    }
}

/// `commit:` section
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CommitConfig {
    /// Inline template for the commit prompt
    /// Available variables: {{ git_status }}, {{ changed_files }}, {{ branch }}, {{ repo }}
    pub template: Option<String>,

    /// Path to a template file (mutually exclusive with template); supports `~`
    #[serde(rename = "template-file")]
    pub template_file: Option<String>,
}

/// `addcheat:` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AddcheatConfig {
    /// navi cheatsheet directory; supports `~`
    #[serde(rename = "cheat-directory")]
    pub cheat_directory: String,

    /// Shell history file; defaults to `$HISTFILE`, then `~/.zsh_history`
    #[serde(rename = "history-file")]
    pub history_file: Option<String>,
}

impl Default for AddcheatConfig {
    fn default() -> Self {
        Self {
            cheat_directory: "~/.local/share/navi/cheats".to_string(),
            history_file: None,
        }
    }
}
