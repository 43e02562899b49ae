//! # Fragment Catalogs
//!
//! Two kinds of name → fragment tables take part in resolution:
//!
//! - **`Catalog`**: the *baseline*, built from the fragments of the current
//!   run and grown as resolution promotes registry entries into it. Catalogs
//!   are plain values; growing one produces the next value instead of mutating
//!   shared state.
//! - **`Registry`**: the *global* fallback table of well-known fragments. It is
//!   read-only for the whole run and passed explicitly to the resolver.
//!
//! Baseline lookups always take priority over registry lookups.

use std::collections::BTreeMap;

use glob::Pattern;

use crate::error::Result;
use crate::fragment::Fragment;

/// Mapping from fragment name to fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<String, Fragment>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index fragments by key. A later fragment with the same key replaces an
    /// earlier one.
    pub fn from_fragments<'a>(fragments: impl IntoIterator<Item = &'a Fragment>) -> Self {
        let entries = fragments
            .into_iter()
            .map(|fragment| (fragment.key().to_string(), fragment.clone()))
            .collect();
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&Fragment> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Fragment)> {
        self.entries.iter().map(|(name, fragment)| (name.as_str(), fragment))
    }

    /// Return a catalog that also holds the given registry entries.
    ///
    /// Entries already present in `self` win over registry entries; names the
    /// registry does not know are ignored.
    pub fn with_promoted<'a>(
        mut self,
        names: impl IntoIterator<Item = &'a String>,
        registry: &Registry,
    ) -> Self {
        for name in names {
            if self.entries.contains_key(name) {
                continue;
            }
            if let Some(fragment) = registry.get(name) {
                self.entries.insert(name.clone(), fragment.clone());
            }
        }
        self
    }
}

/// The read-only global fragment table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    catalog: Catalog,
}

impl Registry {
    /// A registry with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The fragments every run knows about.
    pub fn builtin() -> Self {
        Self::empty().extended([
            Fragment::named("c")
                .with_tag("c")
                .with_comment("this is the system default c installation")
                .with_script(["apt-get install c"])
                .with_dependencies(["machine"]),
            Fragment::named("machine")
                .with_tag("machine")
                .with_comment("this is the system default machine installation")
                .with_script(["apt-get install machine"]),
        ])
    }

    /// Return a registry extended with `fragments`, which replace existing
    /// entries of the same name. Unnamed fragments are skipped.
    pub fn extended(mut self, fragments: impl IntoIterator<Item = Fragment>) -> Self {
        for fragment in fragments {
            if let Some(name) = fragment.name.clone() {
                self.catalog.entries.insert(name, fragment);
            }
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Fragment> {
        self.catalog.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.catalog.contains(name)
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Fragment)> {
        self.catalog.iter()
    }

    /// Entries whose name matches the glob `pattern`, in name order.
    pub fn matching(&self, pattern: &str) -> Result<Vec<&Fragment>> {
        let pattern = Pattern::new(pattern)?;
        Ok(self
            .iter()
            .filter(|(name, _)| pattern.matches(name))
            .map(|(_, fragment)| fragment)
            .collect())
    }
}
