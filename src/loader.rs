//! # Fragment Loading
//!
//! Maps a requested fragment name to the text of its source file.
//!
//! ## Path Convention
//!
//! The name is split on `-`. A single segment is used twice; the segments
//! become nested path components and `.sh` is appended:
//!
//! | name | path |
//! |------|------|
//! | `foo` | `foo/foo.sh` |
//! | `foo-bar` | `foo/bar.sh` |
//! | `node-14` | `node/14.sh` |
//!
//! A name with several segments usually encodes a version. When its file is
//! missing, [`DirLoader`] falls back to the unversioned name (`node-14` →
//! `node/node.sh`). A missing source is otherwise fatal.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::fragment::Fragment;
use crate::parser;

/// File extension of fragment sources.
pub const FRAGMENT_EXTENSION: &str = "sh";

/// Something that can produce the source text of a named fragment.
pub trait FragmentLoader {
    fn load(&self, name: &str) -> Result<String>;
}

/// Relative path of the source file for `name`.
pub fn fragment_path(name: &str) -> PathBuf {
    let mut segments: Vec<&str> = name.split('-').collect();
    if segments.len() == 1 {
        segments.push(segments[0]);
    }
    let last = segments.len() - 1;
    let mut path = PathBuf::new();
    for (index, segment) in segments.iter().enumerate() {
        if index == last {
            // Not set_extension: versions like `1.21` already contain a dot
            path.push(format!("{}.{}", segment, FRAGMENT_EXTENSION));
        } else {
            path.push(segment);
        }
    }
    path
}

/// The unversioned form of `name`, if it has one.
fn base_name(name: &str) -> Option<&str> {
    match name.split_once('-') {
        Some((base, _)) if !base.is_empty() => Some(base),
        _ => None,
    }
}

/// Loads fragments from files under a root directory.
#[derive(Debug, Clone)]
pub struct DirLoader {
    root: PathBuf,
}

impl DirLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, name: &str) -> Result<Option<String>> {
        let path = self.root.join(fragment_path(name));
        debug!("reading fragment {:?} from {}", name, path.display());
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

impl FragmentLoader for DirLoader {
    fn load(&self, name: &str) -> Result<String> {
        if let Some(text) = self.read(name)? {
            return Ok(text);
        }

        if let Some(base) = base_name(name) {
            if let Some(text) = self.read(base)? {
                warn!(
                    "no source for {:?}, using {} instead",
                    name,
                    fragment_path(base).display()
                );
                return Ok(text);
            }
        }

        Err(Error::FragmentNotFound {
            name: name.to_string(),
            path: self.root.join(fragment_path(name)),
        })
    }
}

/// Serves fragment sources from memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    sources: HashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.sources.insert(name.into(), text.into());
        self
    }
}

impl FragmentLoader for MemoryLoader {
    fn load(&self, name: &str) -> Result<String> {
        self.sources
            .get(name)
            .cloned()
            .ok_or_else(|| Error::FragmentNotFound {
                name: name.to_string(),
                path: fragment_path(name),
            })
    }
}

/// Load and parse every requested name, concatenating the fragments in
/// request order. The first missing source aborts the whole load.
pub fn load_all<L, S>(loader: &L, names: &[S]) -> Result<Vec<Fragment>>
where
    L: FragmentLoader + ?Sized,
    S: AsRef<str>,
{
    let mut fragments = Vec::new();
    for name in names {
        let text = loader.load(name.as_ref())?;
        fragments.extend(parser::parse(&text));
    }
    Ok(fragments)
}
