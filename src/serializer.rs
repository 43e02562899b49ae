//! # Serializer
//!
//! Renders fragments back into shell-script text.
//!
//! Each fragment becomes a block of two header lines followed by its script:
//!
//! ```text
//! # <name> <tag>
//! # <comment>
//! <script lines>
//! ```
//!
//! Absent header fields are left out, so a fragment without a comment gets a
//! bare `#` line, which the parser ignores. A fragment with no script lines
//! that is followed by another fragment gets one blank script line, so its
//! headers do not run into the next fragment's headers when parsed again. The output is a lossy inverse of
//! [`crate::parser::parse`]: a fragment described by several header lines is
//! always written back as exactly two.

use crate::fragment::Fragment;
use crate::parser::{COMMENT_MARKER, DEPENDENCIES_KEYWORD, SHEBANG_MARKER};

/// Options controlling serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Shell to name in a leading `#!/bin/<shell>` line.
    pub shebang: Option<String>,
    /// Emit a `# dependencies:` header for fragments that declare any.
    pub include_dependencies: bool,
}

fn header(parts: &[Option<&str>]) -> String {
    let mut line = COMMENT_MARKER.to_string();
    for part in parts.iter().flatten() {
        line.push(' ');
        line.push_str(part);
    }
    line
}

fn fragment_lines(fragment: &Fragment, options: &SerializeOptions, out: &mut Vec<String>) {
    out.push(header(&[fragment.name.as_deref(), fragment.tag.as_deref()]));
    out.push(header(&[fragment.comment.as_deref()]));

    if options.include_dependencies {
        if let Some(dependencies) = fragment.dependencies.as_ref().filter(|d| !d.is_empty()) {
            out.push(format!(
                "{} {}: {}",
                COMMENT_MARKER,
                DEPENDENCIES_KEYWORD,
                dependencies.join(" ")
            ));
        }
    }

    out.extend(fragment.script.iter().cloned());
}

/// Render `fragments` in the given order as one script.
///
/// The result ends with a newline unless no lines were produced at all.
pub fn to_sh<'a>(
    fragments: impl IntoIterator<Item = &'a Fragment>,
    options: &SerializeOptions,
) -> String {
    let mut lines = Vec::new();
    if let Some(shell) = &options.shebang {
        lines.push(format!("{}/bin/{}", SHEBANG_MARKER, shell));
    }
    let mut fragments = fragments.into_iter().peekable();
    while let Some(fragment) = fragments.next() {
        fragment_lines(fragment, options, &mut lines);
        if fragment.script.is_empty() && fragments.peek().is_some() {
            lines.push(String::new());
        }
    }

    if lines.is_empty() {
        return String::new();
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
