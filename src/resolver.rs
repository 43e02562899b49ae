//! # Dependency Resolution
//!
//! Computes which fragments a requested fragment needs, in the order they must
//! run, and promotes registry fragments into the baseline catalog as they are
//! required.
//!
//! ## Process
//!
//! 1.  **Definition Lookup**: A name is looked up in the baseline catalog first,
//!     then in the registry. A name known to neither has no dependencies.
//!
//! 2.  **Post-Order Expansion**: For each direct dependency, in declared order,
//!     the dependency's own ancestors are emitted first and then the dependency
//!     itself. A name reached through several paths appears several times;
//!     callers deduplicate.
//!
//! 3.  **Cycle Detection**: The traversal keeps the current dependency path.
//!     Reaching a name that is already on the path fails with
//!     [`Error::CycleDetected`] naming the cycle.
//!
//! 4.  **Promotion**: [`prepend_dependencies`] splits the expansion into names
//!     the baseline already has, names the registry can supply, and names
//!     nobody defines. Registry entries are copied into a new baseline value;
//!     undefined names are reported back as unresolved.

use std::collections::HashSet;

use log::debug;

use crate::catalog::{Catalog, Registry};
use crate::error::{Error, Result};

/// Result of resolving one fragment against a baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    /// The baseline extended with every registry entry the fragment needed.
    pub catalog: Catalog,
    /// Deduplicated dependencies followed by the fragment itself.
    pub order: Vec<String>,
    /// Required names found in neither the baseline nor the registry.
    pub unresolved: Vec<String>,
}

/// Dependencies declared for `name`, baseline first.
fn dependencies_of<'a>(name: &str, baseline: &'a Catalog, global: &'a Registry) -> &'a [String] {
    baseline
        .get(name)
        .or_else(|| global.get(name))
        .map(|fragment| fragment.dependencies())
        .unwrap_or(&[])
}

struct Frame<'a> {
    dependencies: &'a [String],
    next: usize,
}

/// Expand `name` into its ancestors, each ancestor after its own ancestors.
///
/// The result does not contain `name` itself and may contain duplicates.
pub fn resolve(name: &str, baseline: &Catalog, global: &Registry) -> Result<Vec<String>> {
    let mut order = Vec::new();
    let mut path: Vec<&str> = vec![name];
    let mut on_path: HashSet<&str> = HashSet::from([name]);
    let mut stack = vec![Frame {
        dependencies: dependencies_of(name, baseline, global),
        next: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let dependencies = frame.dependencies;
        match dependencies.get(frame.next) {
            Some(dependency) => {
                frame.next += 1;
                if on_path.contains(dependency.as_str()) {
                    return Err(cycle_error(&path, dependency));
                }
                path.push(dependency);
                on_path.insert(dependency);
                stack.push(Frame {
                    dependencies: dependencies_of(dependency, baseline, global),
                    next: 0,
                });
            }
            None => {
                stack.pop();
                if let Some(finished) = path.pop() {
                    on_path.remove(finished);
                    // The requested name itself is not part of its ancestry
                    if !stack.is_empty() {
                        order.push(finished.to_string());
                    }
                }
            }
        }
    }

    Ok(order)
}

fn cycle_error(path: &[&str], repeated: &str) -> Error {
    let start = path.iter().position(|name| *name == repeated).unwrap_or(0);
    let mut cycle: Vec<&str> = path[start..].to_vec();
    cycle.push(repeated);
    Error::CycleDetected {
        cycle: cycle.join(" -> "),
    }
}

/// Remove repeated names, keeping each name at its first position.
pub fn dedup_first(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Resolve `name` and promote the registry fragments it needs into `baseline`.
///
/// Takes the baseline by value and returns the next one, so a sequence of
/// calls threads the catalog explicitly from step to step.
pub fn prepend_dependencies(name: &str, baseline: Catalog, global: &Registry) -> Result<Promotion> {
    let dependencies = dedup_first(resolve(name, &baseline, global)?);

    let (already_baseline, missing): (Vec<&String>, Vec<&String>) = dependencies
        .iter()
        .partition(|dependency| baseline.contains(dependency.as_str()));
    let (promotable, unresolved): (Vec<&String>, Vec<&String>) = missing
        .into_iter()
        .partition(|dependency| global.contains(dependency.as_str()));

    debug!(
        "resolved {:?}: {} dependencies ({} local, {} from registry, {} unresolved)",
        name,
        dependencies.len(),
        already_baseline.len(),
        promotable.len(),
        unresolved.len()
    );

    let unresolved = unresolved.into_iter().cloned().collect();
    let catalog = baseline.with_promoted(promotable, global);

    let mut order = dependencies;
    order.push(name.to_string());

    Ok(Promotion {
        catalog,
        order,
        unresolved,
    })
}
