//! Shared test utilities for E2E tests.
//!
//! This module provides common fixtures and catalog snippets to reduce
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
//!     let fixture = TestFixture::new()
//!         .with_file("en.json", catalogs::EN)
//!         .with_file("zh.json", catalogs::ZH_PARTIAL);
//!     fixture.command().args(["diff", "en.json", "zh.json"]).assert().code(1);
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::catalogs;
    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
}

/// Catalog documents used across tests.
#[allow(dead_code)]
pub mod catalogs {
    /// The reference locale.
    pub const EN: &str = r#"{
  "nav": {
    "home": "Home",
    "signIn": "Sign in"
  },
  "events": {
    "browse": {
      "title": "Browse events",
      "foundCount": "Found {{count}} events"
    }
  }
}
"#;

    /// A translation missing `nav.signIn` and `events.browse.foundCount`,
    /// with an orphan key and a placeholder.
    pub const ZH_PARTIAL: &str = r#"{
  "nav": {
    "home": "首页"
  },
  "events": {
    "browse": {
      "title": "TODO"
    }
  },
  "legacy": "旧"
}
"#;

    /// A complete translation.
    pub const ZH_COMPLETE: &str = r#"{
  "nav": {
    "home": "首页",
    "signIn": "登录"
  },
  "events": {
    "browse": {
      "title": "浏览活动",
      "foundCount": "找到 {{count}} 个活动"
    }
  }
}
"#;

    /// A catalog with the same section defined twice.
    pub const WITH_DUPLICATES: &str = r#"{
  "admin": {
    "title": "Admin"
  },
  "jobs": "Jobs",
  "admin": {
    "users": "Users"
  }
}
"#;

    /// A catalog with a missing closing brace.
    pub const UNBALANCED: &str = r#"{
  "nav": {
    "home": "Home"
}
"#;
}

/// Configuration files used across tests.
#[allow(dead_code)]
pub mod configs {
    /// Every JSON file in the directory is a target of `en.json`.
    pub const ALL_JSON: &str = "reference: en.json\ntargets:\n  - '*.json'\n";

    /// Explicit target with a prefixed generator.
    pub const ZH_PREFIXED: &str = r#"reference: en.json
targets:
  - path: zh.json
    generator: { style: prefixed, value: "[ZH] " }
placeholders:
  - { pattern: "TODO", match: exact }
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "reference: [en.json\n";
}

/// A test fixture that provides a temporary directory of catalogs.
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

    /// Add a `.catalog-sync.yaml` configuration file with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.with_file(".catalog-sync.yaml", content)
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

    /// Read a file back from the fixture.
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path)).expect("Failed to read file")
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory, with
    /// colors off and no configuration override from the environment.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("catalog-sync");
        cmd.current_dir(self.path())
            .env_remove("CATALOG_SYNC_CONFIG")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_with_file() {
        let fixture = TestFixture::new().with_file("en.json", catalogs::EN);
        assert!(fixture.path().join("en.json").exists());
    }

    #[test]
    fn test_catalog_constants_are_valid_json() {
        for catalog in [catalogs::EN, catalogs::ZH_PARTIAL, catalogs::ZH_COMPLETE] {
            serde_json::from_str::<serde_json::Value>(catalog).expect("valid JSON");
        }
    }
}
