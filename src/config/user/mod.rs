//! User-level configuration
//!
//! Personal preferences for bruh, not checked into any repository.

mod path;
mod sections;

use std::path::Path;

use config::{Case, Config, ConfigError, File, FileFormat};
use serde::Deserialize;

pub use path::{CONFIG_PATH_ENV, get_config_path};
pub use sections::{
    AddcheatConfig, AiConfig, BranchConfig, CommitConfig, DEFAULT_PR_PROMPT,
    DEFAULT_PR_PROMPT_NAME, PrConfig,
};

/// User configuration, loaded once in `main` and handed to each command.
///
/// Stored at `~/.config/bruh/config.yaml` (or `$XDG_CONFIG_HOME/bruh/config.yaml`):
///
/// ```yaml
/// branch:
///   using_tmux: true
///   editor: nvim
/// pr:
///   prompts:
///     default: "Based on the following git changes, create a PR. Execute the gh pr create command directly."
///     terse: "Create a PR with a one-paragraph description."
/// cleanup-pre-commit:
///   - my-repo
/// ai:
///   command: claude
/// addcheat:
///   cheat-directory: ~/.local/share/navi/cheats
/// ```
///
/// Environment variables override file settings using the `BRUH_` prefix with
/// `__` between nested keys (e.g. `BRUH_BRANCH__EDITOR=vim`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub branch: BranchConfig,

    pub pr: PrConfig,

    /// Repository names (work tree basenames) where `bruh commit` runs the
    /// pre-commit cleanup loop by default
    #[serde(rename = "cleanup-pre-commit")]
    pub cleanup_pre_commit: Vec<String>,

    pub ai: AiConfig,

    pub commit: CommitConfig,

    pub addcheat: AddcheatConfig,
}

impl UserConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// Later sources override earlier ones:
    /// 1. Default values
    /// 2. Config file (see [`get_config_path`]); a missing file is not an error
    /// 3. Environment variables (`BRUH_*`)
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_path = get_config_path(explicit_path);
        if let Some(config_path) = config_path.as_ref()
            && config_path.exists()
        {
            log::debug!("Loading config from {}", config_path.display());
            builder = builder.add_source(File::from(config_path.clone()).format(FileFormat::Yaml));
        } else if let Some(config_path) = explicit_path {
            crate::styling::eprintln!(
                "{}",
                crate::styling::warning_message(format!(
                    "Config file not found: {}",
                    config_path.display()
                ))
            );
        }

        // - prefix_separator("_"): BRUH_ → key
        // - separator("__"): BRANCH__EDITOR → branch.editor
        // - convert_case(Kebab): CLEANUP_PRE_COMMIT → cleanup-pre-commit
        builder = builder.add_source(
            config::Environment::with_prefix("BRUH")
                .prefix_separator("_")
                .separator("__")
                .convert_case(Case::Kebab),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a YAML string, without environment overrides.
    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = Config::builder()
            .add_source(File::from_str(content, FileFormat::Yaml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.commit.template.is_some() && self.commit.template_file.is_some() {
            return Err(ConfigError::Message(
                "commit.template and commit.template-file are mutually exclusive".into(),
            ));
        }

        if self.ai.command.trim().is_empty() {
            return Err(ConfigError::Message("ai.command must not be empty".into()));
        }

        Ok(())
    }

    /// Whether the pre-commit cleanup loop runs by default in `repo_name`.
    pub fn cleanup_enabled_for(&self, repo_name: &str) -> bool {
        self.cleanup_pre_commit.iter().any(|name| name == repo_name)
    }
}
