//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `shellmerge`
//! command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and the run [`Context`]
//!   and performs the command's logic.
//!
//! The [`Context`] is built once per run from the global flags: it holds the
//! project configuration, the registry assembled from every configuration
//! layer, and the output settings.

pub mod completions;
pub mod detect;
pub mod ls;
pub mod merge;
pub mod resolve;
pub mod tree;

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use shellmerge::catalog::Registry;
use shellmerge::config::{self, Config};
use shellmerge::defaults;
use shellmerge::loader::DirLoader;
use shellmerge::output::OutputConfig;
use shellmerge::suggestions;

use crate::cli::GlobalArgs;

/// Fragment names plus where to read them from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Fragment names, e.g. `app` or `node-14` (read from `node/14.sh`)
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,

    /// Directory fragment sources are read from.
    ///
    /// Defaults to the `fragments_dir` of the project configuration, or the
    /// current directory.
    #[arg(short = 'd', long, value_name = "DIR", env = "SHELLMERGE_FRAGMENTS")]
    pub fragments_dir: Option<PathBuf>,
}

impl SourceArgs {
    /// The loader for this run: flag, then configuration, then default.
    pub fn loader(&self, config: &Config) -> DirLoader {
        let root = self
            .fragments_dir
            .clone()
            .unwrap_or_else(|| config.fragments_dir());
        DirLoader::new(root)
    }
}

/// Everything a command needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct Context {
    pub out: OutputConfig,
    pub config: Config,
    pub registry: Registry,
}

impl Context {
    /// Load configuration layers as named by the global flags.
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let out = OutputConfig::from_env_and_flag(&global.color);

        if let Some(path) = &global.config {
            if !path.is_file() {
                return Err(suggestions::config_not_found(path));
            }
        }
        let config = config::load(global.config.as_deref())?;

        let user_registry = global
            .registry
            .clone()
            .or_else(defaults::user_registry_path);
        let registry = config::load_registry(&config, user_registry.as_deref())?;

        Ok(Self {
            out,
            config,
            registry,
        })
    }
}
