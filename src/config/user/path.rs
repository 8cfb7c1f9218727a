use std::path::{Path, PathBuf};

#[cfg(not(test))]
use etcetera::base_strategy::{BaseStrategy, choose_base_strategy};

/// Environment variable naming the config file; used by tests.
pub const CONFIG_PATH_ENV: &str = "BRUH_CONFIG_PATH";

/// File name shared by the user config dir and the working-directory fallback.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Where the user config lives.
///
/// Priority: the `--config` flag, then `BRUH_CONFIG_PATH`, then
/// `$XDG_CONFIG_HOME/bruh/config.yaml` (`~/.config/bruh/config.yaml`). When
/// that file does not exist, `./config.yaml` is used if present.
pub fn get_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }

    // In test builds the real user config must never be read
    #[cfg(test)]
    panic!(
        "BRUH_CONFIG_PATH not set in test. Pass an explicit path or set it to an isolated config."
    );

    // choose_base_strategy uses XDG on Linux and macOS, %APPDATA% on Windows
    #[cfg(not(test))]
    {
        let user_file = choose_base_strategy()
            .ok()
            .map(|strategy| strategy.config_dir().join("bruh").join(CONFIG_FILE_NAME));
        prefer_existing(user_file, Path::new(".").join(CONFIG_FILE_NAME))
    }
}

/// `user_file` unless it is missing and `cwd_file` exists.
fn prefer_existing(user_file: Option<PathBuf>, cwd_file: PathBuf) -> Option<PathBuf> {
    match user_file {
        Some(path) if path.exists() => Some(path),
        user_file if cwd_file.is_file() => {
            log::debug!(
                "No user config at {:?}, using {}",
                user_file,
                cwd_file.display()
            );
            Some(cwd_file)
        }
        user_file => user_file,
    }
}
