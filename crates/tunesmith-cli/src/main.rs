//! Tunesmith CLI - Command-line interface for music style prompt generation
//!
//! This binary turns a free-text description into a length-bounded style
//! prompt, offline or through an LLM provider.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use tunesmith_cli::commands;
use tunesmith_cli::commands::config::ConfigAction;
use tunesmith_cli::commands::generate::GenerateArgs;
use tunesmith_cli::logging::setup_tracing;

/// Tunesmith - Style Prompt Generator for Generative Music
#[derive(Parser)]
#[command(name = "tunesmith")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Debug-level diagnostics on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a style prompt from a description
    Generate(GenerateArgs),

    /// List registry genres with their tempo ranges
    Genres {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the resolved configuration and provider key presence
    Doctor,

    /// Show or edit the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = setup_tracing(cli.verbose) {
        eprintln!("{}: {}", colored::Colorize::yellow("warning"), e);
    }

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Generate(args) => commands::generate::run(args, config),
        Commands::Genres { json } => commands::genres::run(*json),
        Commands::Doctor => commands::doctor::run(config),
        Commands::Config { action } => commands::config::run(action, config),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
