//! # Merge Command Implementation
//!
//! This module implements the default action of `shellmerge`: composing the
//! named fragments, and everything they depend on, into one script.
//!
//! ## Process
//!
//! 1.  **Load**: Each requested name is read from the fragments directory and
//!     parsed. A missing source aborts the run before anything is written.
//! 2.  **Compose**: Dependencies are resolved against the loaded fragments and
//!     the registry, producing a dependency-first order.
//! 3.  **Report**: Names no catalog defines are listed on one summary line.
//!     They do not fail the run.
//! 4.  **Write**: The composition is serialized to the output file, or to
//!     stdout with `--stdout`.

use anyhow::{Context as _, Result};
use clap::Args;
use std::path::PathBuf;

use shellmerge::composer::{compose_requested, Composition};
use shellmerge::serializer::{to_sh, SerializeOptions};
use shellmerge::suggestions;

use super::{Context, SourceArgs};

/// Merge shell fragments and their dependencies into one script
#[derive(Args, Debug, Clone, Default)]
pub struct MergeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub write: WriteArgs,
}

/// Where and how the composed script is written.
#[derive(Args, Debug, Clone, Default)]
pub struct WriteArgs {
    /// File to write the composed script to [default: setup.sh]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Start the script with `#!/bin/<SHELL>`
    #[arg(long, value_name = "SHELL")]
    pub shebang: Option<String>,

    /// Keep `# dependencies:` headers in the composed script
    #[arg(long)]
    pub include_dependencies: bool,

    /// Print the composed script instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl WriteArgs {
    fn output(&self, context: &Context) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| context.config.output())
    }

    fn serialize_options(&self, context: &Context) -> SerializeOptions {
        SerializeOptions {
            shebang: self
                .shebang
                .clone()
                .or_else(|| context.config.shebang.clone()),
            include_dependencies: self.include_dependencies
                || context.config.include_dependencies,
        }
    }
}

/// Execute the default merge action.
pub fn execute(args: MergeArgs, context: &Context) -> Result<()> {
    if args.source.names.is_empty() {
        return Err(suggestions::no_fragments_requested());
    }
    merge(&args.source, &args.write, context)
}

/// Compose `source` and write it as `write` describes.
pub fn merge(source: &SourceArgs, write: &WriteArgs, context: &Context) -> Result<()> {
    let out = context
        .out
        .clone()
        .quiet(write.quiet)
        .to_stderr(write.stdout);
    let output = write.output(context);

    let destination = if write.stdout {
        "stdout".to_string()
    } else {
        output.display().to_string()
    };
    out.report(
        "🔗",
        "==>",
        format!(
            "outputting combination of shell scripts {} to {}",
            source.names.join(", "),
            destination
        ),
    );

    let loader = source.loader(&context.config);
    let composition = compose_requested(&loader, &source.names, &context.registry)
        .map_err(suggestions::explain)?;
    out.report_failures(&composition.failures);

    let script = render(&composition, &write.serialize_options(context));
    if write.stdout {
        print!("{}", script);
        return Ok(());
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(&output, script)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    out.report(
        "✅",
        "[OK]",
        format!(
            "wrote {} fragment(s) to {}",
            composition.fragments().len(),
            output.display()
        ),
    );
    Ok(())
}

fn render(composition: &Composition, options: &SerializeOptions) -> String {
    to_sh(composition.fragments(), options)
}
