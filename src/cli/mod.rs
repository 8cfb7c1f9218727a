use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Color, Styles};
use clap::{Args, Parser, Subcommand};
use strum::IntoEnumIterator;

use bruh::config::DEFAULT_PR_PROMPT_NAME;
use bruh::scan::{Category, Ecosystem};

/// Custom styles for help output
fn help_styles() -> Styles {
    Styles::styled()
        .header(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .usage(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .literal(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
        )
        .placeholder(anstyle::Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
        .error(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .valid(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .invalid(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
}

/// Parse one `--language` value, listing the accepted names on failure.
fn parse_ecosystem(s: &str) -> Result<Ecosystem, String> {
    s.trim().parse::<Ecosystem>().map_err(|_| {
        let valid: Vec<String> = Ecosystem::iter().map(|e| e.to_string()).collect();
        format!("unknown language `{s}`; valid languages: {}", valid.join(", "))
    })
}

/// Collapse a `--x` / `--no-x` pair. None = neither given, use config.
pub(crate) fn flag_pair(positive: bool, negative: bool) -> Option<bool> {
    match (positive, negative) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

#[derive(Parser)]
#[command(name = "bruh")]
#[command(about = "Shortcuts for everyday developer chores", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
#[command(styles = help_styles())]
#[command(arg_required_else_help = true)]
pub(crate) struct Cli {
    /// User config file path
    #[arg(
        long,
        global = true,
        value_name = "path",
        display_order = 101,
        help_heading = "Global Options"
    )]
    pub config: Option<PathBuf>,

    /// Show tool output (-v), or also debug logs (-vv)
    #[arg(
        long,
        short = 'v',
        global = true,
        action = clap::ArgAction::Count,
        display_order = 102,
        help_heading = "Global Options"
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create a worktree on a new branch and open an editor in it
    #[command(after_long_help = "\
The worktree lands next to the repository, at <parent>/<repo>-<branch>.

Inside tmux (and unless --no-tmux), the editor opens in a new tmux window
named after the branch. Otherwise it runs in the foreground.")]
    Branch {
        /// Branch to start from [default: current branch]
        #[arg(long, value_name = "branch")]
        from_branch: Option<String>,

        /// Name of the new branch [default: <from-branch>-worktree]
        #[arg(long, value_name = "name")]
        branch_name: Option<String>,

        /// Editor to open in the worktree [default: branch.editor]
        #[arg(long, value_name = "command")]
        editor: Option<String>,

        /// Open the editor in a new tmux window
        #[arg(long, overrides_with = "no_tmux")]
        using_tmux: bool,

        /// Run the editor in this terminal
        #[arg(long = "no-tmux", overrides_with = "using_tmux")]
        no_tmux: bool,
    },

    /// Commit staged changes with a generated message
    #[command(after_long_help = "\
Without a message, the staged diff is sent to the AI command (ai.command) and
its reply becomes the message. Commits skip hooks (--no-verify).

With pre-commit cleanup, `pre-commit run --all-files` runs first; failures are
handed to the AI command to fix and the run is retried, up to five times.")]
    Commit {
        /// Commit message; words are joined with spaces
        #[arg(value_name = "message")]
        message: Vec<String>,

        /// Run pre-commit and let the AI fix failures first
        #[arg(long, overrides_with = "no_cleanup_pre_commit")]
        cleanup_pre_commit: bool,

        /// Skip the pre-commit cleanup
        #[arg(long, overrides_with = "cleanup_pre_commit")]
        no_cleanup_pre_commit: bool,

        /// Print the commit prompt instead of committing
        #[arg(long)]
        show_prompt: bool,
    },

    /// Pull request helpers
    #[command(args_conflicts_with_subcommands = true)]
    Pr {
        #[command(subcommand)]
        subcommand: Option<PrCommand>,

        #[command(flatten)]
        create: PrCreateArgs,
    },

    /// Run the security and lint scanners for this project
    #[command(after_long_help = "\
Ecosystems are detected from marker files (go.mod, package.json, Cargo.toml,
...) and source file extensions. Missing scanners are skipped with an install
hint. Exits non-zero when any scanner reports issues or fails to run.

With no category flags, every category runs.")]
    Scan {
        /// Secret scanning (gitleaks)
        #[arg(short = 's', long)]
        secrets: bool,

        /// Security analysis
        #[arg(short = 'S', long)]
        security: bool,

        /// Static analysis and lints
        #[arg(short = 't', long = "static")]
        static_checks: bool,

        /// Dependency vulnerability checks
        #[arg(long)]
        vulns: bool,

        /// Every category (the default)
        #[arg(short = 'a', long)]
        all: bool,

        /// Scan these languages instead of detecting them
        #[arg(
            short = 'l',
            long,
            value_name = "lang",
            value_delimiter = ',',
            value_parser = parse_ecosystem
        )]
        language: Vec<Ecosystem>,
    },

    /// Add the previous shell command to a navi cheatsheet
    Addcheat {
        /// Extra instructions for the AI
        #[arg(value_name = "instructions")]
        instructions: Vec<String>,

        /// Cheatsheet directory [default: addcheat.cheat-directory]
        #[arg(long, value_name = "path")]
        cheat_directory: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub(crate) enum PrCommand {
    /// Have the AI open a pull request for the current branch
    Create(PrCreateArgs),
}

#[derive(Args, Clone)]
pub(crate) struct PrCreateArgs {
    /// Branch to merge into [default: repository default branch]
    #[arg(long, value_name = "branch")]
    pub base: Option<String>,

    /// Use this title instead of a generated one
    #[arg(long)]
    pub title: Option<String>,

    /// Named prompt from pr.prompts
    #[arg(long, value_name = "name", default_value = DEFAULT_PR_PROMPT_NAME)]
    pub prompt: String,
}

impl Commands {
    /// Categories picked by `scan` flags; empty means all.
    pub(crate) fn scan_categories(
        secrets: bool,
        security: bool,
        static_checks: bool,
        vulns: bool,
        all: bool,
    ) -> Vec<Category> {
        if all {
            return Vec::new();
        }
        [
            (secrets, Category::Secrets),
            (security, Category::Security),
            (static_checks, Category::Static),
            (vulns, Category::Vulns),
        ]
        .into_iter()
        .filter_map(|(on, category)| on.then_some(category))
        .collect()
    }
}
