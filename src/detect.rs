//! # Project Detection
//!
//! Recognises the toolchains a project uses and names the fragments that
//! install them, so a setup script can be composed without listing fragments
//! by hand.
//!
//! ## Recognisers
//!
//! Each recogniser looks at the project's files and answers one of:
//! not recognised, recognised without a version, or recognised with a version.
//! A version is appended to the fragment name (`golang` + `1.21` →
//! `golang-1.21`), which the loader maps to a versioned source file and falls
//! back from when that file does not exist.
//!
//! | fragment | evidence |
//! |----------|----------|
//! | `node` | `package.json` / `package-lock.json`, version from `engines.node` |
//! | `gatsby` | a `package.json` listing `gatsby` in `dependencies` |
//! | `rust` | `Cargo.toml` / `Cargo.lock` |
//! | `golang` | `go.mod`, version from its `go` directive |
//!
//! Dependency and build directories (`.git`, `node_modules`, `target`) are not
//! searched.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use regex::Regex;
use walkdir::WalkDir;

use crate::error::{Error, Result};

const SKIPPED_DIRS: &[&str] = &[".git", "node_modules", "target"];

/// Files of a project, relative to its root, in sorted order.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    files: Vec<PathBuf>,
}

impl Project {
    /// Scan the directory tree under `root`.
    pub fn scan(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::Detect {
                message: format!("{} is not a directory", root.display()),
            });
        }

        let walker = WalkDir::new(&root).into_iter().filter_entry(|entry| {
            entry.depth() == 0
                || !(entry.file_type().is_dir()
                    && SKIPPED_DIRS
                        .iter()
                        .any(|skipped| entry.file_name() == *skipped))
        });

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() {
                if let Ok(relative) = entry.path().strip_prefix(&root) {
                    files.push(relative.to_path_buf());
                }
            }
        }
        files.sort();

        debug!("scanned {} files under {}", files.len(), root.display());
        Ok(Self { root, files })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files whose name matches `pattern`, in sorted order.
    fn find(&self, pattern: &Regex) -> Vec<&PathBuf> {
        self.files
            .iter()
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| pattern.is_match(name))
            })
            .collect()
    }

    fn read(&self, relative: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(self.root.join(relative))?)
    }

    fn read_json(&self, relative: &Path) -> Option<serde_json::Value> {
        let parsed = self
            .read(relative)
            .and_then(|text| serde_json::from_str(&text).map_err(Error::Json));
        match parsed {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("skipping {}: {}", relative.display(), e);
                None
            }
        }
    }
}

/// What a recogniser concluded about a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// The toolchain is not used.
    Absent,
    /// The toolchain is used; no particular version is required.
    Present,
    /// The toolchain is used at this version.
    Version(String),
}

type Recognizer = fn(&Project) -> Result<Detection>;

/// Recognisers in reporting order.
const RECOGNIZERS: &[(&str, Recognizer)] = &[
    ("node", node_version),
    ("gatsby", gatsby_version),
    ("rust", rust_version),
    ("golang", go_version),
];

/// Pull a plain dotted version number out of a constraint such as `>=14.0`.
fn plain_version(constraint: &str) -> Result<Option<String>> {
    let version = Regex::new(r"\d+(\.\d+)*")?;
    Ok(version.find(constraint).map(|m| m.as_str().to_string()))
}

fn node_version(project: &Project) -> Result<Detection> {
    let manifests = project.find(&Regex::new(r"^(package-lock|package)\.json$")?);
    let Some(last) = manifests.last() else {
        return Ok(Detection::Absent);
    };

    let constraint = project.read_json(last).and_then(|json| {
        json.pointer("/engines/node")
            .and_then(|value| value.as_str())
            .map(str::to_string)
    });
    match constraint {
        Some(constraint) => Ok(plain_version(&constraint)?
            .map(Detection::Version)
            .unwrap_or(Detection::Present)),
        None => Ok(Detection::Present),
    }
}

fn gatsby_version(project: &Project) -> Result<Detection> {
    let uses_gatsby = project
        .find(&Regex::new(r"^package\.json$")?)
        .into_iter()
        .filter_map(|path| project.read_json(path))
        .any(|json| {
            json.pointer("/dependencies/gatsby")
                .and_then(|value| value.as_str())
                .is_some_and(|version| !version.is_empty())
        });
    Ok(if uses_gatsby {
        Detection::Present
    } else {
        Detection::Absent
    })
}

fn rust_version(project: &Project) -> Result<Detection> {
    let manifests = project.find(&Regex::new(r"^Cargo\.(toml|lock)$")?);
    Ok(if manifests.is_empty() {
        Detection::Absent
    } else {
        Detection::Present
    })
}

fn go_version(project: &Project) -> Result<Detection> {
    let modules = project.find(&Regex::new(r"^go\.mod$")?);
    let Some(first) = modules.first() else {
        return Ok(Detection::Absent);
    };

    let directive = Regex::new(r"(?m)^go\s+(\S+)")?;
    let content = project.read(first)?;
    Ok(directive
        .captures(&content)
        .and_then(|captures| captures.get(1))
        .map(|version| Detection::Version(version.as_str().to_string()))
        .unwrap_or(Detection::Present))
}

/// Fragment names for the toolchains used by the project at `root`.
pub fn detect(root: &Path) -> Result<Vec<String>> {
    let project = Project::scan(root)?;
    let mut names = Vec::new();

    for (name, recognize) in RECOGNIZERS {
        match recognize(&project)? {
            Detection::Absent => {}
            Detection::Present => names.push(name.to_string()),
            Detection::Version(version) => names.push(format!("{}-{}", name, version)),
        }
    }

    debug!("detected {:?} in {}", names, project.root().display());
    Ok(names)
}
