use std::process;

use clap::Parser;
use color_print::cformat;

use bruh::config::UserConfig;
use bruh::error::BruhError;
use bruh::git::GitError;
use bruh::styling::{ERROR_SYMBOL, eprintln, error_message, format_with_gutter};

mod cli;
mod commands;
mod llm;

use cli::{Cli, Commands, PrCommand, flag_pair};
use commands::{
    AddcheatOptions, BranchOptions, CommandEnv, CommitOptions, PrOptions, handle_addcheat,
    handle_branch, handle_commit, handle_pr_create, handle_scan,
};

/// Logs are opt-in: `RUST_LOG` wins, otherwise warnings, or debug with `-vv`.
fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    if std::env::var("RUST_LOG").is_err() {
        let level = if verbose >= 2 {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        };
        builder.filter_level(level);
    }
    let _ = builder.try_init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        return Ok(());
    };

    let config = UserConfig::load(cli.config.as_deref()).map_err(|e| {
        anyhow::anyhow!(
            "{}\n{}",
            error_message("Failed to load config"),
            format_with_gutter(&e.to_string(), None)
        )
    })?;
    log::debug!("Loaded config: {config:?}");

    match command {
        Commands::Branch {
            from_branch,
            branch_name,
            editor,
            using_tmux,
            no_tmux,
        } => handle_branch(
            CommandEnv::for_current_repo(config)?,
            BranchOptions {
                from_branch,
                branch_name,
                editor,
                using_tmux: flag_pair(using_tmux, no_tmux),
            },
        ),
        Commands::Commit {
            message,
            cleanup_pre_commit,
            no_cleanup_pre_commit,
            show_prompt,
        } => handle_commit(
            CommandEnv::for_current_repo(config)?,
            CommitOptions {
                message,
                cleanup_pre_commit: flag_pair(cleanup_pre_commit, no_cleanup_pre_commit),
                show_prompt,
            },
        ),
        Commands::Pr { subcommand, create } => {
            let args = match subcommand {
                Some(PrCommand::Create(args)) => args,
                None => create,
            };
            handle_pr_create(
                CommandEnv::for_current_repo(config)?,
                PrOptions {
                    base: args.base,
                    title: args.title,
                    prompt: args.prompt,
                },
            )
        }
        Commands::Scan {
            secrets,
            security,
            static_checks,
            vulns,
            all,
            language,
        } => {
            let categories =
                Commands::scan_categories(secrets, security, static_checks, vulns, all);
            handle_scan(&categories, language, cli.verbose >= 1)
        }
        Commands::Addcheat {
            instructions,
            cheat_directory,
        } => handle_addcheat(
            &config.addcheat,
            &config.ai,
            AddcheatOptions {
                instructions,
                cheat_directory,
            },
        ),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        // Typed errors carry their own styling
        if let Some(err) = e.downcast_ref::<GitError>() {
            eprintln!("{err}");
        } else if let Some(err) = e.downcast_ref::<BruhError>() {
            eprintln!("{err}");
        } else {
            let mut message = e.to_string();
            for cause in e.chain().skip(1) {
                message.push_str(&cformat!("\n  <dim>caused by:</> {cause}"));
            }
            // Messages built with error_message already carry the symbol
            if message.contains(ERROR_SYMBOL) {
                eprintln!("{message}");
            } else {
                eprintln!("{}", error_message(message));
            }
        }
        process::exit(1);
    }
}
