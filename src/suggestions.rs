//! # Error Suggestions
//!
//! Helpers that turn library errors into messages telling the user what went
//! wrong and how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shellmerge::suggestions;
//!
//! let fragments = load_all(&loader, &names).map_err(suggestions::explain)?;
//! ```

use std::path::Path;

use crate::error::Error;

/// Generate an error for a fragment whose source file does not exist.
///
/// Includes hints about the path convention and the fragments directory.
pub fn fragment_not_found(name: &str, path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Fragment source not found for '{name}': {path}\n\n\
         hint: '{name}' is read from <fragments-dir>/{convention}\n\
         hint: Use -d/--fragments-dir or SHELLMERGE_FRAGMENTS to point at your fragment library\n\
         hint: Run 'shellmerge ls' to see built-in fragments usable as dependencies",
        path = path.display(),
        convention = crate::loader::fragment_path(name).display(),
    )
}

/// Generate an error for a dependency cycle.
pub fn cycle_detected(cycle: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Cycle detected in fragment dependencies: {cycle}\n\n\
         hint: Remove one of the '# dependencies:' entries along this path\n\
         hint: Registry entries can declare dependencies too, see 'shellmerge ls --long'"
    )
}

/// Generate an error for a configuration file that was named but not found.
pub fn config_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Configuration file not found: {path}\n\n\
         hint: Create a .shellmerge.yaml file in your project root\n\
         hint: Use --config to specify a different path\n\
         hint: Set SHELLMERGE_CONFIG environment variable",
        path = path.display()
    )
}

/// Generate an error for a run without any fragment names.
pub fn no_fragments_requested() -> anyhow::Error {
    anyhow::anyhow!(
        "No fragments requested\n\n\
         hint: Name one or more fragments, e.g. 'shellmerge app node-14'\n\
         hint: Run 'shellmerge detect' to find fragments for the current project\n\
         hint: Put '--' before a fragment named like a subcommand, e.g. 'shellmerge -- tree'"
    )
}

/// Convert a library error into a user-facing error, adding hints where a
/// specific suggestion exists.
pub fn explain(error: Error) -> anyhow::Error {
    match error {
        Error::FragmentNotFound { name, path } => fragment_not_found(&name, &path),
        Error::CycleDetected { cycle } => cycle_detected(&cycle),
        other => anyhow::Error::new(other),
    }
}
