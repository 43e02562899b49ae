//! The `Fragment` record: one named, taggable unit of shell script.

use serde::{Deserialize, Serialize};

/// A named unit of shell script with metadata and an optional dependency list.
///
/// Fragments are produced by the parser or deserialized from registry files
/// and are treated as immutable afterwards; catalogs only ever hold copies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fragment {
    /// Lookup key of the fragment.
    #[serde(default)]
    pub name: Option<String>,
    /// Descriptive tag. Never used for lookup.
    #[serde(default)]
    pub tag: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub comment: Option<String>,
    /// Raw script lines in source order.
    #[serde(default)]
    pub script: Vec<String>,
    /// Names of the fragments this one requires, in declared order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
}

impl Fragment {
    /// Create an empty fragment with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_script<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.script = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dependencies<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// The catalog key of this fragment: its name, or `""` when unnamed.
    pub fn key(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Declared dependencies, empty when none were declared.
    pub fn dependencies(&self) -> &[String] {
        self.dependencies.as_deref().unwrap_or(&[])
    }
}
