//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers with a clean `CFGTREE_*` environment
//! - Helpers for writing configuration trees

use assert_cmd::Command;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Every variable the CLI reads for options.
const CFGTREE_VARS: [&str; 8] = [
    "CFGTREE_OPTIONS",
    "CFGTREE_LOG_MODE",
    "CFGTREE_FORMAT_PRIORITY",
    "CFGTREE_ENVIRONMENT",
    "CFGTREE_ENVIRONMENT_VAR",
    "CFGTREE_MAX_DEPTH",
    "CFGTREE_CONVENTION_PREFIX",
    "CFGTREE_CLEAN_ORPHANS",
];

/// Test environment with an isolated configuration tree.
///
/// This struct provides an isolated test environment with:
/// - A temporary directory for test files
/// - Helper methods for writing files and running the CLI
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a command builder with every `CFGTREE_*` variable cleared.
    ///
    /// The working directory is the temporary directory, so relative paths
    /// in arguments resolve inside it.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("cfgtree").expect("Failed to find cfgtree binary");
        for var in CFGTREE_VARS {
            cmd.env_remove(var);
        }
        cmd.current_dir(&self.temp_path);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file (creating parent directories) and return its path.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create test directory");
        }
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Create a subdirectory in the test environment.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Write a small tree exercising files, directories and environments.
    ///
    /// ```text
    /// conf/app.json
    /// conf/db.yaml        (default/production blocks)
    /// conf/db/replica.yml
    /// conf/README.md      (ignored)
    /// ```
    pub fn sample_tree(&self) -> PathBuf {
        self.write("conf/app.json", r#"{"name": "billing", "port": "${APP_PORT:-8080}"}"#);
        self.write(
            "conf/db.yaml",
            "default:\n  pool: 5\n  host: \"{{ DB_HOST }}\"\nproduction:\n  pool: 50\n",
        );
        self.write("conf/db/replica.yml", "host: replica.internal\n");
        self.write("conf/README.md", "not configuration\n");
        self.temp_path.join("conf")
    }

    /// Run the CLI, assert success, and parse stdout as JSON.
    pub fn run_json(&self, args: &[&str]) -> Value {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run cfgtree");

        assert!(
            output.status.success(),
            "cfgtree {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        serde_json::from_slice(&output.stdout).expect("Output is not valid JSON")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
