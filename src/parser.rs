//! # Fragment Parser
//!
//! Turns the text of a fragment source file into an ordered list of
//! [`Fragment`]s.
//!
//! ## Grammar
//!
//! Every line starting with `#` is a *header line*; every other line is script.
//! A header line is read by removing all `#` characters, trimming, and splitting
//! the rest on whitespace:
//!
//! - `# dependencies: a b` declares the fragment's dependencies. A later
//!   dependency header replaces an earlier one.
//! - `# name` or `# name tag` (at most two tokens) sets the name and tag.
//! - anything longer is free text and becomes the comment.
//! - a header with no tokens at all (a bare `#`) changes nothing.
//!
//! A header line that follows script lines starts a new fragment, so
//! consecutive header lines describe the same fragment. Note the token-count
//! rule means a two-word comment is read as a name and a tag.
//!
//! A shebang line (`#!/bin/bash`) is neither header nor script and is dropped.
//! The serializer writes its own shebang when asked to.
//!
//! Parsing never fails: anything that is not recognised is kept as a comment
//! or as script.

use crate::fragment::Fragment;

/// Marker that starts a header line.
pub const COMMENT_MARKER: char = '#';

/// Start of a shebang line.
pub const SHEBANG_MARKER: &str = "#!";

/// Leading word of a dependency header.
pub const DEPENDENCIES_KEYWORD: &str = "dependencies";

/// A classified header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    /// `# dependencies: a b c`
    Dependencies(Vec<String>),
    /// `# name [tag]`
    NameTag {
        name: Option<String>,
        tag: Option<String>,
    },
    /// Free-text description.
    Comment(String),
    /// A header with nothing after the markers.
    Empty,
}

impl Header {
    /// Write this header into `fragment`, overwriting the fields it carries.
    fn apply(self, fragment: &mut Fragment) {
        match self {
            Header::Dependencies(names) => fragment.dependencies = Some(names),
            Header::NameTag { name, tag } => {
                fragment.name = name;
                fragment.tag = tag;
            }
            Header::Comment(text) => fragment.comment = Some(text),
            Header::Empty => {}
        }
    }
}

/// Returns true if `line` is a header line.
pub fn is_header(line: &str) -> bool {
    line.starts_with(COMMENT_MARKER)
}

/// Classify a single header line.
pub fn parse_header_line(line: &str) -> Header {
    let stripped: String = line.chars().filter(|c| *c != COMMENT_MARKER).collect();
    let text = stripped.trim();
    let mut tokens = text.split_whitespace();

    let Some(first) = tokens.next() else {
        return Header::Empty;
    };

    if first.starts_with(DEPENDENCIES_KEYWORD) {
        return Header::Dependencies(tokens.map(str::to_string).collect());
    }

    let second = tokens.next();
    if tokens.next().is_none() {
        Header::NameTag {
            name: Some(first.to_string()),
            tag: second.map(str::to_string),
        }
    } else {
        Header::Comment(text.to_string())
    }
}

/// Parse fragment source text into fragments, in source order.
///
/// The result always holds at least one fragment: whatever is accumulated at
/// end of input is kept even when its script is empty.
pub fn parse(text: &str) -> Vec<Fragment> {
    let mut completed = Vec::new();
    let mut current = Fragment::default();

    for line in text.lines() {
        if line.starts_with(SHEBANG_MARKER) {
            continue;
        }
        if is_header(line) {
            if !current.script.is_empty() {
                completed.push(std::mem::take(&mut current));
            }
            parse_header_line(line).apply(&mut current);
        } else {
            current.script.push(line.to_string());
        }
    }

    completed.push(current);
    completed
}
