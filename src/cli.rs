//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;

/// shellmerge - Compose one setup script from dependency-aware shell fragments
///
/// Run with fragment names to merge them (and everything they depend on) into
/// a single script, e.g. `shellmerge app node-14`. A fragment named like a
/// subcommand is requested after `--`, e.g. `shellmerge -- tree`.
#[derive(Parser, Debug)]
#[command(name = "shellmerge")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Commands>,

    /// Fragments to merge when no subcommand is given
    #[command(flatten)]
    merge: commands::merge::MergeArgs,

    #[command(flatten)]
    global: GlobalArgs,
}

/// Options shared by every command.
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path to the project configuration file [default: .shellmerge.yaml if present]
    #[arg(long, global = true, value_name = "FILE", env = "SHELLMERGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the user registry file [default: <config dir>/shellmerge/registry.yaml]
    #[arg(long, global = true, value_name = "FILE", env = "SHELLMERGE_REGISTRY")]
    pub registry: Option<PathBuf>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the order fragments would be merged in
    Resolve(commands::resolve::ResolveArgs),

    /// Display the dependency tree of fragments
    Tree(commands::tree::TreeArgs),

    /// Detect the toolchains a project uses and name their fragments
    Detect(commands::detect::DetectArgs),

    /// List fragments in the registry
    Ls(commands::ls::LsArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.global.log_level);

        // Completions need no configuration, so a broken config cannot block them
        let command = match self.command {
            Some(Commands::Completions(args)) => return commands::completions::execute(args),
            other => other,
        };

        let context = commands::Context::load(&self.global)?;
        match command {
            Some(Commands::Resolve(args)) => commands::resolve::execute(args, &context),
            Some(Commands::Tree(args)) => commands::tree::execute(args, &context),
            Some(Commands::Detect(args)) => commands::detect::execute(args, &context),
            Some(Commands::Ls(args)) => commands::ls::execute(args, &context),
            Some(Commands::Completions(args)) => commands::completions::execute(args),
            None => commands::merge::execute(self.merge, &context),
        }
    }
}

/// Route `log` records to stderr at `level`, unless `RUST_LOG` says otherwise.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when running inside tests
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
