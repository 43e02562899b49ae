//! # Resolve Command Implementation
//!
//! This module implements the `resolve` subcommand, which prints the order the
//! requested fragments would be merged in without writing anything.
//!
//! Each entry is tagged with where its definition comes from: one of the
//! loaded sources, the registry, or nowhere (an unresolved dependency).

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use shellmerge::catalog::Catalog;
use shellmerge::composer::{compose, Composition};
use shellmerge::loader::load_all;
use shellmerge::suggestions;

use super::{Context, SourceArgs};

/// Show the order fragments would be merged in
#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the resolution as JSON
    #[arg(long)]
    pub json: bool,
}

/// Where a fragment in the resolution order is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Input,
    Registry,
    Missing,
}

impl Origin {
    fn label(self) -> &'static str {
        match self {
            Origin::Input => "",
            Origin::Registry => " (registry)",
            Origin::Missing => " (missing)",
        }
    }
}

#[derive(Debug, Serialize)]
struct Entry {
    name: String,
    origin: Origin,
}

#[derive(Debug, Serialize)]
struct Resolution {
    order: Vec<Entry>,
    failures: Vec<String>,
}

fn resolution(input: &Catalog, composition: &Composition) -> Resolution {
    let order = composition
        .order
        .iter()
        .map(|name| Entry {
            name: name.clone(),
            origin: if input.contains(name) {
                Origin::Input
            } else if composition.catalog.contains(name) {
                Origin::Registry
            } else {
                Origin::Missing
            },
        })
        .collect();
    Resolution {
        order,
        failures: composition.failures.clone(),
    }
}

/// Execute the `resolve` command.
pub fn execute(args: ResolveArgs, context: &Context) -> Result<()> {
    if args.source.names.is_empty() {
        return Err(suggestions::no_fragments_requested());
    }

    let loader = args.source.loader(&context.config);
    let fragments = load_all(&loader, &args.source.names).map_err(suggestions::explain)?;
    let composition = compose(&fragments, &context.registry).map_err(suggestions::explain)?;
    let resolution = resolution(&Catalog::from_fragments(&fragments), &composition);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
        return Ok(());
    }

    for (index, entry) in resolution.order.iter().enumerate() {
        println!("{:>3}. {}{}", index + 1, entry.name, entry.origin.label());
    }
    context.out.report_failures(&resolution.failures);
    Ok(())
}
