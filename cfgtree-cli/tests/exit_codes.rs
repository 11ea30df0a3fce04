//! Exit code tests for load failures.
//!
//! Exit codes:
//! - 1: Load or parse failure
//! - 2: No configuration file found
//! - 4: Invalid arguments
//! - 7: Options error

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_parse_error_exit_code() {
    let env = TestEnv::new();
    env.write("conf/broken.yaml", "error: - yes\n");

    env.command()
        .args(["load", "conf"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("broken.yaml"));
}

#[test]
fn test_missing_directory_exit_code() {
    let env = TestEnv::new();

    env.command().args(["load", "nowhere"]).assert().code(4);
}

#[test]
fn test_file_instead_of_directory_exit_code() {
    let env = TestEnv::new();
    env.write("plain.json", "{}");

    env.command().args(["load", "plain.json"]).assert().code(4);
}

#[test]
fn test_missing_options_file_exit_code() {
    let env = TestEnv::new();
    env.sample_tree();

    env.command()
        .args(["--options", "missing.yaml", "load", "conf"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Options file not found"));
}

#[test]
fn test_invalid_options_file_exit_code() {
    let env = TestEnv::new();
    env.sample_tree();
    env.write("cfgtree.yaml", "format-priority: [toml]\n");

    env.command()
        .args(["--options", "cfgtree.yaml", "load", "conf"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Options error"));
}

#[test]
fn test_invalid_env_override_exit_code() {
    let env = TestEnv::new();
    env.sample_tree();

    env.command()
        .env("CFGTREE_MAX_DEPTH", "deep")
        .args(["load", "conf"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("CFGTREE_MAX_DEPTH"));
}

#[test]
fn test_invalid_flag_value_exit_code() {
    let env = TestEnv::new();
    env.sample_tree();

    env.command()
        .args(["load", "conf", "--convention-prefix", "a/b"])
        .assert()
        .code(7);
}

#[test]
fn test_empty_directory_loads_empty_object() {
    let env = TestEnv::new();
    env.create_dir("empty");

    env.command()
        .args(["load", "empty"])
        .assert()
        .success()
        .stdout("{}\n");
}
