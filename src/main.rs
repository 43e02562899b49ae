//! `shellmerge` binary.
//!
//! Reads fragment sources from the fragments directory, merges them with the
//! registry from the configuration layers and writes one setup script. Errors
//! reach the terminal through `anyhow`, with the `hint:` lines added in
//! `shellmerge::suggestions`.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
