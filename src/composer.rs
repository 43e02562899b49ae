//! # Composition
//!
//! Folds dependency resolution across every fragment of a request and produces
//! the final emission order.
//!
//! ## Process
//!
//! 1.  **Baseline**: The input fragments are indexed by name. A later fragment
//!     with the same name replaces an earlier one.
//!
//! 2.  **Left Fold**: For each input fragment, in order, [`prepend_dependencies`]
//!     runs against the running baseline. Its order slice is appended to the
//!     running order and its unresolved names to the running failures; the
//!     returned baseline feeds the next step.
//!
//! 3.  **Deduplication**: The accumulated order keeps each name at its first
//!     occurrence only, so a name that is both requested and depended upon
//!     appears once, as early as it was first needed.
//!
//! Unresolved names stay in the order but have no catalog entry; they are
//! skipped when the order is mapped back to fragments.

use log::warn;

use crate::catalog::{Catalog, Registry};
use crate::error::Result;
use crate::fragment::Fragment;
use crate::loader::{load_all, FragmentLoader};
use crate::resolver::{dedup_first, prepend_dependencies, Promotion};

/// The outcome of composing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    /// Dependency-first emission order, without duplicates.
    pub order: Vec<String>,
    /// The baseline after every promotion.
    pub catalog: Catalog,
    /// Names required somewhere but defined nowhere, in first-seen order.
    pub failures: Vec<String>,
}

impl Composition {
    /// Fragments to emit, in order. Names without a catalog entry are skipped.
    pub fn fragments(&self) -> Vec<&Fragment> {
        self.order
            .iter()
            .filter_map(|name| self.catalog.get(name))
            .collect()
    }

    /// Returns true if every required name was found.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Compose `fragments` (already concatenated across every requested source, in
/// source order) against the global `registry`.
pub fn compose(fragments: &[Fragment], registry: &Registry) -> Result<Composition> {
    let mut catalog = Catalog::from_fragments(fragments);
    let mut order = Vec::new();
    let mut failures = Vec::new();

    for fragment in fragments {
        let Promotion {
            catalog: next,
            order: slice,
            unresolved,
        } = prepend_dependencies(fragment.key(), catalog, registry)?;

        for name in &unresolved {
            warn!(
                "no installation instructions for {:?} (required by {:?})",
                name,
                fragment.key()
            );
        }

        catalog = next;
        order.extend(slice);
        failures.extend(unresolved);
    }

    Ok(Composition {
        order: dedup_first(order),
        catalog,
        failures: dedup_first(failures),
    })
}

/// Load every requested name through `loader` and compose the result.
///
/// A missing source aborts before any resolution happens.
pub fn compose_requested<L, S>(loader: &L, names: &[S], registry: &Registry) -> Result<Composition>
where
    L: FragmentLoader + ?Sized,
    S: AsRef<str>,
{
    let fragments = load_all(loader, names)?;
    compose(&fragments, registry)
}
