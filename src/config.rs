//! # Configuration
//!
//! This module defines the `.shellmerge.yaml` project configuration and the
//! registry files that extend the built-in fragment registry.
//!
//! ## Layers
//!
//! Settings are combined from, lowest precedence first:
//!
//! 1.  the built-in registry ([`Registry::builtin`]);
//! 2.  the user registry file (see [`crate::defaults::user_registry_path`]),
//!     a YAML list of fragments;
//! 3.  the project configuration file;
//! 4.  command-line flags, applied by the binary.
//!
//! ## Format
//!
//! ```yaml
//! fragments_dir: scripts
//! output: setup.sh
//! shebang: bash
//! include_dependencies: false
//! registry:
//!   - name: rust
//!     tag: rust
//!     comment: install the rust toolchain
//!     script:
//!       - curl https://sh.rustup.rs -sSf | sh -s -- -y
//!     dependencies: [machine]
//! ```
//!
//! Every key is optional. Unknown keys are rejected so typos do not silently
//! fall back to defaults.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::Registry;
use crate::defaults;
use crate::error::{Error, Result};
use crate::fragment::Fragment;

const CONFIG_KEYS: &str = "fragments_dir, output, shebang, include_dependencies, registry";

/// Project configuration read from `.shellmerge.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Directory fragment sources are looked up under.
    pub fragments_dir: Option<PathBuf>,
    /// File the composed script is written to.
    pub output: Option<PathBuf>,
    /// Shell named in a leading shebang line.
    pub shebang: Option<String>,
    /// Keep `# dependencies:` headers in the composed script.
    pub include_dependencies: bool,
    /// Project-specific registry entries.
    pub registry: Vec<Fragment>,
}

impl Config {
    /// Fragment directory, falling back to the default.
    pub fn fragments_dir(&self) -> PathBuf {
        self.fragments_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(defaults::FRAGMENTS_DIR))
    }

    /// Output file, falling back to the default.
    pub fn output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(defaults::OUTPUT_FILE))
    }
}

/// True when `content` holds no YAML besides comments and whitespace.
fn is_blank(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

fn config_error(source: serde_yaml::Error, hint: Option<String>) -> Error {
    Error::ConfigParse {
        message: source.to_string(),
        hint,
    }
}

/// Parse a project configuration from YAML.
pub fn parse(yaml_content: &str) -> Result<Config> {
    if is_blank(yaml_content) {
        return Ok(Config::default());
    }
    serde_yaml::from_str(yaml_content).map_err(|e| {
        let hint = e
            .to_string()
            .contains("unknown field")
            .then(|| format!("valid keys are: {}", CONFIG_KEYS));
        config_error(e, hint)
    })
}

/// Read and parse a configuration file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Load the project configuration.
///
/// An explicitly named file must exist. Without one, `.shellmerge.yaml` in
/// the working directory is used when present and defaults otherwise.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => {
            debug!("loading configuration from {}", path.display());
            from_file(path)
        }
        None => {
            let path = Path::new(defaults::CONFIG_FILE);
            if path.is_file() {
                debug!("loading configuration from {}", path.display());
                from_file(path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

/// Parse a registry file: a YAML list of fragments.
pub fn parse_registry(yaml_content: &str) -> Result<Vec<Fragment>> {
    if is_blank(yaml_content) {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(yaml_content).map_err(|e| {
        config_error(
            e,
            Some("a registry file is a list of fragments with name, tag, comment, script and dependencies".to_string()),
        )
    })
}

/// Build the registry for a run: built-in entries, then the user registry file
/// if it exists, then the project configuration's entries.
pub fn load_registry(config: &Config, user_registry: Option<&Path>) -> Result<Registry> {
    let mut registry = Registry::builtin();

    if let Some(path) = user_registry {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                debug!("loading user registry from {}", path.display());
                registry = registry.extended(parse_registry(&content)?);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(Error::Io(e)),
        }
    }

    Ok(registry.extended(config.registry.iter().cloned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
fragments_dir: scripts
output: out/setup.sh
shebang: bash
include_dependencies: true
registry:
  - name: rust
    tag: rust
    comment: install the rust toolchain
    script:
      - curl https://sh.rustup.rs -sSf | sh -s -- -y
    dependencies: [machine]
"#;
        let config = parse(yaml).unwrap();

        assert_eq!(config.fragments_dir(), PathBuf::from("scripts"));
        assert_eq!(config.output(), PathBuf::from("out/setup.sh"));
        assert_eq!(config.shebang.as_deref(), Some("bash"));
        assert!(config.include_dependencies);
        assert_eq!(config.registry.len(), 1);
        assert_eq!(config.registry[0].dependencies(), ["machine".to_string()]);
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = parse("# nothing configured yet\n\n").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.output(), PathBuf::from(defaults::OUTPUT_FILE));
        assert_eq!(config.fragments_dir(), PathBuf::from(defaults::FRAGMENTS_DIR));
    }

    #[test]
    fn test_parse_unknown_key_has_hint() {
        let err = parse("outptu: setup.sh\n").unwrap_err();
        let display = err.to_string();
        assert!(display.contains("Configuration parsing error"));
        assert!(display.contains("valid keys are"));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(parse("output: [unclosed").is_err());
    }

    #[test]
    fn test_parse_registry_list() {
        let fragments = parse_registry("- name: git\n  script: [apt-get install git]\n").unwrap();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].key(), "git");
    }

    #[test]
    fn test_parse_registry_rejects_mapping() {
        assert!(parse_registry("name: git\n").is_err());
    }

    #[test]
    fn test_load_registry_layers() {
        let temp = TempDir::new().unwrap();
        let user = temp.path().join("registry.yaml");
        std::fs::write(
            &user,
            "- name: machine\n  script: [echo user machine]\n- name: git\n  script: [echo git]\n",
        )
        .unwrap();

        let config = Config {
            registry: vec![Fragment::named("git").with_script(["echo project git"])],
            ..Config::default()
        };
        let registry = load_registry(&config, Some(user.as_path())).unwrap();

        assert_eq!(registry.get("machine").unwrap().script, vec!["echo user machine"]);
        assert_eq!(registry.get("git").unwrap().script, vec!["echo project git"]);
        assert!(registry.contains("c"));
    }

    #[test]
    fn test_load_registry_missing_user_file_is_ignored() {
        let temp = TempDir::new().unwrap();
        let absent = temp.path().join("absent.yaml");
        let registry = load_registry(&Config::default(), Some(absent.as_path())).unwrap();
        assert_eq!(registry, Registry::builtin());
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.yaml");
        assert!(load(Some(missing.as_path())).is_err());
    }

    #[test]
    #[serial]
    fn test_load_implicit_file_from_working_directory() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(defaults::CONFIG_FILE), "output: custom.sh\n").unwrap();

        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(temp.path()).unwrap();
        let result = load(None);
        std::env::set_current_dir(previous).unwrap();

        assert_eq!(result.unwrap().output(), PathBuf::from("custom.sh"));
    }

    #[test]
    #[serial]
    fn test_load_without_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(temp.path()).unwrap();
        let result = load(None);
        std::env::set_current_dir(previous).unwrap();

        assert_eq!(result.unwrap(), Config::default());
    }
}
