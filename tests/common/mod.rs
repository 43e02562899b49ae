//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures and helper functions to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_fragment("app/app.sh", fragments::APP);
//!     fixture.command().arg("app").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::fragments;
    pub use super::TestFixture;
}

/// Fragment sources used across tests.
#[allow(dead_code)]
pub mod fragments {
    /// Depends on the built-in `c`, which depends on `machine`.
    pub const APP: &str = "# app\n# dependencies: c\necho hi\n";

    /// Depends on a name nobody defines.
    pub const APP2: &str = "# app2\n# dependencies: ghost\necho app2\n";

    /// Overrides the built-in `machine`.
    pub const CUSTOM_MACHINE: &str = "# machine\necho custom machine\n";

    /// Node.js 14 installer depending on `machine`.
    pub const NODE_14: &str = "# node 14\n# install node 14 from nodesource\n# dependencies: machine\napt-get install -y nodejs\n";

    /// First half of a two-fragment cycle.
    pub const CYCLE_A: &str = "# a\n# dependencies: b\necho a\n";

    /// Second half of a two-fragment cycle.
    pub const CYCLE_B: &str = "# b\n# dependencies: a\necho b\n";
}

/// A test fixture that provides a temporary directory holding fragment
/// sources and an optional `.shellmerge.yaml`.
///
/// Commands built by [`TestFixture::command`] run inside the directory and
/// ignore the user's own registry and environment.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new().with_fragment("app/app.sh", fragments::APP);
///
/// fixture.command()
///     .arg("app")
///     .assert()
///     .success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `.shellmerge.yaml` configuration file with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.with_file(".shellmerge.yaml", content)
    }

    /// Add a fragment source at `path` (e.g. `node/14.sh`).
    pub fn with_fragment(self, path: &str, content: &str) -> Self {
        self.with_file(path, content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Read a file from the temp directory.
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.temp_dir.path().join(path)).expect("Failed to read file")
    }

    /// A `shellmerge` command running in the fixture directory.
    ///
    /// The user registry points at a file that does not exist, so only the
    /// built-in registry and the fixture's configuration apply.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("shellmerge");
        cmd.current_dir(self.path())
            .env("SHELLMERGE_REGISTRY", self.path().join("no-such-registry.yaml"))
            .env("NO_COLOR", "1")
            .env_remove("SHELLMERGE_CONFIG")
            .env_remove("SHELLMERGE_FRAGMENTS")
            .env_remove("CLICOLOR_FORCE")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
