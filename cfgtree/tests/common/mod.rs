//! Common test utilities for integration tests.
//!
//! This module provides fixture paths and environment helpers for testing
//! the cfgtree library.

use std::env;
use std::path::PathBuf;

/// Variable referenced by `{{ CFGTREE_FIXTURE_ENV }}` placeholders in fixtures.
#[allow(dead_code)]
pub const FIXTURE_ENV: &str = "CFGTREE_FIXTURE_ENV";

/// Variable referenced by `${CFGTREE_FIXTURE_WORKER:-1}` in fixtures.
#[allow(dead_code)]
pub const FIXTURE_WORKER: &str = "CFGTREE_FIXTURE_WORKER";

/// Path to a file or directory under `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

/// RAII guard for setting and restoring environment variables.
///
/// Note: Tests using environment variables should not run in parallel.
/// Use #[serial] attribute or ensure tests clean up properly.
pub struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

#[allow(dead_code)]
impl EnvGuard {
    pub fn new(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    /// Create a guard that removes the env var (useful for cleanup).
    pub fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(val) => env::set_var(&self.key, val),
            None => env::remove_var(&self.key),
        }
    }
}

/// Set the fixture variables to known values and clear every `CFGTREE_*`
/// option override, restoring all of them when the guards drop.
#[allow(dead_code)]
pub fn fixture_env() -> Vec<EnvGuard> {
    let mut guards: Vec<EnvGuard> = cfgtree::options::overrides::ALL_OVERRIDE_VARS
        .iter()
        .map(|key| EnvGuard::remove(key))
        .collect();
    guards.push(EnvGuard::new(FIXTURE_ENV, "test"));
    guards.push(EnvGuard::remove(FIXTURE_WORKER));
    guards
}
