//! Ecosystem-aware scanning
//!
//! A flat table of [`ToolDescriptor`]s per [`Ecosystem`], driven by one
//! generic runner. [`run_scan`] resolves the ecosystems, builds the run order
//! with [`plan`], runs every tool (never stopping early) and fails with
//! [`BruhError::ScanFailed`] if any tool reported issues or could not run.

pub mod catalog;
mod ecosystem;
mod runner;
mod tool;

use std::path::Path;

use color_print::cformat;
use indexmap::IndexSet;
use strum::IntoEnumIterator;

use crate::error::BruhError;
use crate::styling::{eprintln, info_message, success_message, warning_message};

pub use ecosystem::{Ecosystem, detect_ecosystems, resolve_ecosystems};
pub use runner::{ToolRun, report, run_and_report, run_tool};
pub use tool::{Category, ExitPolicy, IssueCodes, ToolDescriptor, ToolOutcome};

/// Settings for one scan, built from flags and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub categories: IndexSet<Category>,
    /// Use the tools' verbose arguments and show output of clean runs
    pub verbose: bool,
    /// Skip detection and scan exactly these ecosystems
    pub forced: Vec<Ecosystem>,
}

impl RunConfig {
    /// Every category enabled, detection on, quiet.
    pub fn all() -> Self {
        Self {
            categories: Category::iter().collect(),
            verbose: false,
            forced: Vec::new(),
        }
    }

    /// The categories named on the command line; none selected means all.
    pub fn from_selection(selected: &[Category]) -> Self {
        let mut config = Self::all();
        if !selected.is_empty() {
            config.categories = selected.iter().copied().collect();
        }
        config
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn forced(mut self, forced: Vec<Ecosystem>) -> Self {
        self.forced = forced;
        self
    }

    pub fn enables(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }
}

/// Tools to run, in order: the secret scanner, then each ecosystem's tools in
/// table order, filtered by the enabled categories.
///
/// A tool shared by two ecosystems (JavaScript and TypeScript both forced)
/// appears once.
pub fn plan(ecosystems: &IndexSet<Ecosystem>, config: &RunConfig) -> Vec<&'static ToolDescriptor> {
    let mut tools: Vec<&'static ToolDescriptor> = Vec::new();

    if config.enables(Category::Secrets) {
        tools.push(&catalog::GITLEAKS);
    }

    for &ecosystem in ecosystems {
        for tool in catalog::tools_for(ecosystem) {
            if config.enables(tool.category) && !tools.iter().any(|t| t.name == tool.name) {
                tools.push(tool);
            }
        }
    }

    tools
}

/// Detect, run and aggregate.
pub fn run_scan(root: &Path, config: &RunConfig) -> anyhow::Result<()> {
    if config.categories.is_empty() {
        eprintln!(
            "{}",
            info_message("No scan categories selected; use --all or pick one")
        );
        return Ok(());
    }

    let ecosystems = resolve_ecosystems(root, &config.forced);
    if ecosystems.is_empty() {
        eprintln!(
            "{}",
            warning_message("No supported ecosystems detected in this directory")
        );
        return Ok(());
    }

    let names: Vec<String> = ecosystems.iter().map(|e| e.to_string()).collect();
    let names = names.join(", ");
    eprintln!("{}", info_message(cformat!("Scanning <bold>{names}</>")));

    let failed: Vec<String> = plan(&ecosystems, config)
        .into_iter()
        .map(|tool| run_and_report(tool, root, config.verbose))
        .filter(|run| run.outcome.is_failure())
        .map(|run| run.name.to_string())
        .collect();

    if !failed.is_empty() {
        return Err(BruhError::ScanFailed { failed }.into());
    }

    eprintln!(
        "{}",
        success_message("All enabled scans completed successfully")
    );
    Ok(())
}
