//! # shellmerge
//!
//! This library composes one installable shell script from a library of small,
//! named shell-script *fragments*, pulling in every fragment a requested
//! fragment transitively depends on and ordering the result so dependencies
//! run first. It backs the `shellmerge` command-line tool.
//!
//! ## Quick Example
//!
//! ```
//! use shellmerge::catalog::Registry;
//! use shellmerge::composer::compose;
//! use shellmerge::parser::parse;
//! use shellmerge::serializer::{to_sh, SerializeOptions};
//!
//! let fragments = parse("# app\n# dependencies: c\necho hi\n");
//! let composition = compose(&fragments, &Registry::builtin()).unwrap();
//!
//! assert_eq!(composition.order, vec!["machine", "c", "app"]);
//! assert!(composition.failures.is_empty());
//!
//! let script = to_sh(composition.fragments(), &SerializeOptions::default());
//! assert!(script.ends_with("echo hi\n"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Fragments (`fragment`, `parser`)**: A fragment source file is shell
//!   script whose `#` header lines name the fragment, describe it and declare
//!   its dependencies.
//! - **Loading (`loader`)**: Maps a fragment name such as `node-14` to a source
//!   file (`node/14.sh`) under a fragments directory.
//! - **Catalogs (`catalog`)**: The baseline catalog holds the fragments of the
//!   current run; the read-only registry supplies well-known fragments nobody
//!   defined locally.
//! - **Resolution (`resolver`, `composer`)**: Every requested fragment is
//!   expanded into its dependencies, registry fragments are promoted into the
//!   baseline, and the results are folded into one deduplicated order.
//!   Dependencies nobody defines are collected as failures instead of aborting.
//! - **Serialization (`serializer`)**: The final order is rendered back into a
//!   single script.
//!
//! ## Execution Flow
//!
//! 1.  **Load**: read and parse the source of each requested name.
//! 2.  **Index**: build the baseline catalog from the parsed fragments.
//! 3.  **Resolve**: fold dependency resolution over the fragments, threading
//!     the catalog and the failure list through each step.
//! 4.  **Deduplicate**: keep each name at its first position.
//! 5.  **Serialize**: write the fragments out in order.

pub mod catalog;
pub mod composer;
pub mod config;
pub mod defaults;
pub mod detect;
pub mod error;
pub mod fragment;
pub mod loader;
pub mod output;
pub mod parser;
pub mod resolver;
pub mod serializer;
pub mod suggestions;

#[cfg(test)]
mod resolver_proptest;
