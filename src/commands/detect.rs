//! # Detect Command Implementation
//!
//! This module implements the `detect` subcommand, which inspects a project
//! directory for the toolchains it uses (Node.js, Gatsby, Rust, Go) and prints
//! the fragment names that install them, e.g. `node-14` or `golang-1.21`.
//!
//! With `--merge` the detected names are merged straight away, exactly as if
//! they had been passed to `shellmerge` by hand.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use shellmerge::detect::detect;
use shellmerge::suggestions;

use super::merge::{merge, WriteArgs};
use super::{Context, SourceArgs};

/// Detect the toolchains a project uses
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Project directory to inspect
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Merge the detected fragments instead of listing them
    #[arg(long)]
    pub merge: bool,

    /// Directory fragment sources are read from when merging.
    #[arg(short = 'd', long, value_name = "DIR", env = "SHELLMERGE_FRAGMENTS")]
    pub fragments_dir: Option<PathBuf>,

    #[command(flatten)]
    pub write: WriteArgs,
}

/// Execute the `detect` command.
pub fn execute(args: DetectArgs, context: &Context) -> Result<()> {
    let names = detect(&args.path).map_err(suggestions::explain)?;

    if !args.merge {
        if names.is_empty() {
            context.out.report(
                "🔍",
                "--",
                format!("no known toolchains found in {}", args.path.display()),
            );
        }
        for name in &names {
            println!("{}", name);
        }
        return Ok(());
    }

    if names.is_empty() {
        return Err(suggestions::no_fragments_requested());
    }
    let source = SourceArgs {
        names,
        fragments_dir: args.fragments_dir,
    };
    merge(&source, &args.write, context)
}
