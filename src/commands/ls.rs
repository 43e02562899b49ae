//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand, which lists the fragments of
//! the registry: the built-in entries plus those from the user registry file
//! and the project configuration. These are the names any fragment can depend
//! on without a source file of its own.
//!
//! ## Functionality
//!
//! - **Pattern Filtering**: Supports glob patterns to filter names (e.g. `node*`)
//! - **Detailed Output**: Optional long format showing comment and dependencies
//! - **Counting**: `--count` prints only the number of matches

use anyhow::Result;
use clap::Args;

use shellmerge::fragment::Fragment;
use shellmerge::suggestions;

use super::Context;

/// List fragments in the registry
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Only list names matching this glob pattern
    #[arg(value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Use long listing format showing comments and dependencies
    #[arg(short, long)]
    pub long: bool,

    /// Show only the total count of fragments
    #[arg(long)]
    pub count: bool,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs, context: &Context) -> Result<()> {
    let matches = context
        .registry
        .matching(args.pattern.as_deref().unwrap_or("*"))
        .map_err(suggestions::explain)?;

    if args.count {
        println!("{}", matches.len());
        return Ok(());
    }

    for fragment in matches {
        if args.long {
            println!("{}", long_line(fragment));
        } else {
            println!("{}", fragment.key());
        }
    }
    Ok(())
}

/// `name  comment  [dependencies]`, with absent parts left out.
fn long_line(fragment: &Fragment) -> String {
    let mut line = fragment.key().to_string();
    if let Some(comment) = &fragment.comment {
        line.push_str("  ");
        line.push_str(comment);
    }
    if !fragment.dependencies().is_empty() {
        line.push_str(&format!("  [{}]", fragment.dependencies().join(", ")));
    }
    line
}
