//! Configuration for bruh
//!
//! A single user config file (`~/.config/bruh/config.yaml`) with one section
//! per subcommand. It is loaded once in `main` into a [`UserConfig`] value
//! that handlers receive explicitly.

mod user;

pub use user::{
    AddcheatConfig, AiConfig, BranchConfig, CONFIG_PATH_ENV, CommitConfig, DEFAULT_PR_PROMPT,
    DEFAULT_PR_PROMPT_NAME, PrConfig, UserConfig, get_config_path,
};
