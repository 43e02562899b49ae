//! Default values for shellmerge configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Name of the project configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = ".shellmerge.yaml";

/// File the composed script is written to.
pub const OUTPUT_FILE: &str = "setup.sh";

/// Directory fragment sources are looked up under.
pub const FRAGMENTS_DIR: &str = ".";

/// Returns the path of the user-level registry file, if the platform has a
/// configuration directory.
///
/// - Linux: `~/.config/shellmerge/registry.yaml` (XDG Base Directory)
/// - macOS: `~/Library/Application Support/shellmerge/registry.yaml`
/// - Windows: `{FOLDERID_RoamingAppData}\shellmerge\registry.yaml`
pub fn user_registry_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("shellmerge").join("registry.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_registry_path_shape() {
        if let Some(path) = user_registry_path() {
            assert!(path.ends_with("shellmerge/registry.yaml"));
        }
    }

    #[test]
    fn test_defaults_are_relative() {
        assert!(PathBuf::from(OUTPUT_FILE).is_relative());
        assert!(PathBuf::from(CONFIG_FILE).is_relative());
    }
}
