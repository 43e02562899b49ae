//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which displays the
//! dependencies of the requested fragments in a hierarchical format.
//!
//! ## Functionality
//!
//! - **Dependency Tree Visualization**: One tree per loaded fragment, children
//!   in declared order
//! - **Origin Markers**: Registry-provided nodes are marked `(registry)` and
//!   nodes nobody defines `(missing)`
//! - **Depth Control**: Supports `--depth` flag to limit tree depth
//!
//! Cycles are rejected before anything is drawn. This command is a safe,
//! read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use ptree::{print_tree, TreeItem};

use shellmerge::catalog::{Catalog, Registry};
use shellmerge::composer::compose;
use shellmerge::loader::load_all;
use shellmerge::suggestions;

use super::{Context, SourceArgs};

/// Display the dependency tree of fragments
#[derive(Args, Debug)]
pub struct TreeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Maximum depth to display in the tree.
    ///
    /// If not specified, displays the full tree.
    /// Use 0 to show only the requested fragments, 1 to show their direct
    /// dependencies, etc.
    #[arg(long, value_name = "NUM")]
    pub depth: Option<usize>,
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs, context: &Context) -> Result<()> {
    if args.source.names.is_empty() {
        return Err(suggestions::no_fragments_requested());
    }

    let loader = args.source.loader(&context.config);
    let fragments = load_all(&loader, &args.source.names).map_err(suggestions::explain)?;
    // Fails on cycles, which would otherwise make the tree infinite
    compose(&fragments, &context.registry).map_err(suggestions::explain)?;

    let input = Catalog::from_fragments(&fragments);
    let max_depth = args.depth.unwrap_or(usize::MAX);
    for fragment in &fragments {
        let root = build_tree_node(fragment.key(), &input, &context.registry, max_depth, 0);
        print_tree(&root).map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))?;
    }

    Ok(())
}

/// Build the tree node for `name`, looking definitions up in `input` first.
fn build_tree_node(
    name: &str,
    input: &Catalog,
    registry: &Registry,
    max_depth: usize,
    current_depth: usize,
) -> TreeNode {
    let (definition, marker) = match (input.get(name), registry.get(name)) {
        (Some(fragment), _) => (Some(fragment), ""),
        (None, Some(fragment)) => (Some(fragment), " (registry)"),
        (None, None) => (None, " (missing)"),
    };
    let display_name = if name.is_empty() { "(unnamed)" } else { name };
    let label = format!("{}{}", display_name, marker);

    let dependencies = definition.map(|f| f.dependencies()).unwrap_or(&[]);
    if current_depth >= max_depth || dependencies.is_empty() {
        TreeNode {
            label,
            children: vec![],
        }
    } else {
        let children = dependencies
            .iter()
            .map(|dependency| {
                build_tree_node(dependency, input, registry, max_depth, current_depth + 1)
            })
            .collect();
        TreeNode { label, children }
    }
}

/// Tree node structure for ptree visualization
#[derive(Clone)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> std::borrow::Cow<'_, [Self::Child]> {
        std::borrow::Cow::Borrowed(&self.children)
    }
}
