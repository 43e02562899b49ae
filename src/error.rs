//! # Error Handling
//!
//! This module defines the centralized error type for the `shellmerge`
//! library. It uses the `thiserror` library to create an `Error` enum that
//! covers every failure the library can report, each with enough context to
//! tell the user what went wrong.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum of library failures. Fatal conditions such as a
//!   missing fragment source or a dependency cycle are variants here; an
//!   unresolvable dependency is *not*, because it is collected into the
//!   composition's failure list instead of aborting the run.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! The binary wraps these errors in `anyhow::Error` at the command layer.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for shellmerge operations
#[derive(Error, Debug)]
pub enum Error {
    /// The source file for a requested fragment could not be found.
    #[error("Fragment not found: {name} (looked for {})", path.display())]
    FragmentNotFound { name: String, path: PathBuf },

    /// A fragment transitively depends on itself.
    ///
    /// `cycle` lists the dependency path, e.g. `a -> b -> a`.
    #[error("Cycle detected in fragment dependencies: {cycle}")]
    CycleDetected { cycle: String },

    /// An error occurred while parsing a configuration or registry file.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// Project stack detection failed.
    #[error("Project detection error: {message}")]
    Detect { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// A directory walk error, wrapped from `walkdir::Error`.
    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_fragment_not_found() {
        let error = Error::FragmentNotFound {
            name: "node-14".to_string(),
            path: PathBuf::from("scripts/node/14.sh"),
        };
        let display = format!("{}", error);
        assert!(display.contains("Fragment not found"));
        assert!(display.contains("node-14"));
        assert!(display.contains("scripts/node/14.sh"));
    }

    #[test]
    fn test_error_display_cycle_detected() {
        let error = Error::CycleDetected {
            cycle: "a -> b -> a".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Cycle detected"));
        assert!(display.contains("a -> b -> a"));
    }

    #[test]
    fn test_error_display_config_parse() {
        let error = Error::ConfigParse {
            message: "unknown field `outptu`".to_string(),
            hint: None,
        };
        let display = format!("{}", error);
        assert!(display.contains("Configuration parsing error"));
        assert!(display.contains("outptu"));
        assert!(!display.contains("hint:"));
    }

    #[test]
    fn test_error_display_config_parse_with_hint() {
        let error = Error::ConfigParse {
            message: "unknown field `outptu`".to_string(),
            hint: Some("Did you mean `output`?".to_string()),
        };
        let display = format!("{}", error);
        assert!(display.contains("hint:"));
        assert!(display.contains("Did you mean `output`?"));
    }

    #[test]
    fn test_error_display_detect() {
        let error = Error::Detect {
            message: "path does not exist".to_string(),
        };
        assert!(format!("{}", error).contains("Project detection error"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        let display = format!("{}", error);
        assert!(display.contains("I/O error"));
        assert!(display.contains("File not found"));
    }

    #[test]
    fn test_error_from_yaml_error() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: [unclosed").unwrap_err();
        let error: Error = yaml_error.into();
        assert!(format!("{}", error).contains("YAML parsing error"));
    }

    #[test]
    fn test_error_from_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_from_glob_error() {
        let glob_error = glob::Pattern::new("[").unwrap_err();
        let error: Error = glob_error.into();
        assert!(format!("{}", error).contains("Glob pattern error"));
    }
}
