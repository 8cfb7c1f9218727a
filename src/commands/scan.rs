use anyhow::Context;

use bruh::scan::{Category, Ecosystem, RunConfig, run_scan};

/// Scan the working directory.
///
/// Detection starts at the current directory, not the repository root, so a
/// subproject of a monorepo can be scanned on its own.
pub(crate) fn handle_scan(
    categories: &[Category],
    languages: Vec<Ecosystem>,
    verbose: bool,
) -> anyhow::Result<()> {
    let root = std::env::current_dir().context("Failed to read current directory")?;
    let config = RunConfig::from_selection(categories)
        .verbose(verbose)
        .forced(languages);
    log::debug!(
        "Scan categories: {:?}",
        config.categories.iter().map(|c| c.to_string()).collect::<Vec<_>>()
    );
    run_scan(&root, &config)
}
