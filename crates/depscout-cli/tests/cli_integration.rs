//! CLI integration tests for depscout.
//!
//! Each test builds a small monorepo in a temp dir and runs the binary on it.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the depscout binary command, isolated from any user config.
fn depscout(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("depscout").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env_remove("DEPSCOUT_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Two workspaces sharing left-pad, plus a broken manifest and a node_modules decoy.
fn monorepo() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "package.json",
        r#"{"name": "root", "devDependencies": {"typescript": "^5.0.0"}}"#,
    );
    write(
        tmp.path(),
        "apps/web/package.json",
        r#"{"name": "web", "dependencies": {"left-pad": "^1.0.0", "react": "^18.2.0"}}"#,
    );
    write(
        tmp.path(),
        "packages/ui/package.json",
        r#"{"name": "ui", "dependencies": {"left-pad": "^1.0.0"}}"#,
    );
    write(tmp.path(), "packages/broken/package.json", "{ this is not json");
    write(
        tmp.path(),
        "node_modules/left-pad/package.json",
        r#"{"name": "left-pad", "dependencies": {"react": "*"}}"#,
    );
    tmp
}

// ============================================================================
// depscout duplicates
// ============================================================================

#[test]
fn test_duplicates_reports_shared_dependency() {
    let project = monorepo();
    let home = TempDir::new().unwrap();

    depscout(home.path())
        .args(["duplicates", "--root"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 duplicate production dependencies:"))
        .stdout(predicate::str::contains("left-pad:"))
        .stdout(predicate::str::contains("apps/web/package.json (^1.0.0)"))
        .stdout(predicate::str::contains("packages/ui/package.json (^1.0.0)"))
        .stdout(predicate::str::contains("node_modules").not())
        .stdout(predicate::str::contains("Some dependency optimization possible"));
}

#[test]
fn test_duplicates_json_output() {
    let project = monorepo();
    let home = TempDir::new().unwrap();

    let output = depscout(home.path())
        .args(["--format", "json", "duplicates", "--root"])
        .arg(project.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["manifest_count"], 3);
    assert_eq!(value["duplicates"]["left-pad"].as_array().unwrap().len(), 2);
    assert_eq!(value["skipped"].as_array().unwrap().len(), 1);
    assert_eq!(value["status"], "some_optimization");
}

#[test]
fn test_unknown_format_is_rejected() {
    let project = monorepo();
    let home = TempDir::new().unwrap();

    depscout(home.path())
        .args(["--format", "yaml", "duplicates", "--root"])
        .arg(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format 'yaml', expected text or json"));
}

#[test]
fn test_format_name_is_case_insensitive() {
    let project = monorepo();
    let home = TempDir::new().unwrap();

    depscout(home.path())
        .args(["duplicates", "--format", "JSON", "--root"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn test_duplicates_clean_tree() {
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write(
        project.path(),
        "package.json",
        r#"{"name": "solo", "dependencies": {"express": "^4"}}"#,
    );

    depscout(home.path())
        .args(["duplicates", "--root"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No duplicate production dependencies found"))
        .stdout(predicate::str::contains("Dependencies are well optimized"));
}

// ============================================================================
// depscout analyze
// ============================================================================

#[test]
fn test_analyze_reports_manifests_and_totals() {
    let project = monorepo();
    let home = TempDir::new().unwrap();

    depscout(home.path())
        .args(["analyze", "--root"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 4 package.json files:"))
        .stdout(predicate::str::contains("Name: web"))
        .stdout(predicate::str::contains("Heavy deps: react"))
        .stdout(predicate::str::contains("packages/broken/package.json"))
        .stdout(predicate::str::contains("Total unique dependencies: 3"))
        .stdout(predicate::str::contains("Total dependency entries: 4"))
        .stdout(predicate::str::contains("ANALYSIS COMPLETE"));
}

#[test]
fn test_missing_root_fails() {
    let home = TempDir::new().unwrap();

    depscout(home.path())
        .args(["analyze", "--root"])
        .arg(home.path().join("does-not-exist"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project root not found"));
}

// ============================================================================
// depscout config
// ============================================================================

#[test]
fn test_custom_config_changes_denylist() {
    let project = monorepo();
    let home = TempDir::new().unwrap();
    let config = home.path().join("depscout.toml");
    // Only skip "apps" now, so node_modules is fair game
    fs::write(&config, "[scan]\nskip_dirs = [\"apps\"]\n").unwrap();

    depscout(home.path())
        .args(["duplicates", "--config"])
        .arg(&config)
        .arg("--root")
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("apps/web").not())
        .stdout(predicate::str::contains("No duplicate production dependencies found"));
}

#[test]
fn test_config_init_then_show() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("conf").join("depscout.toml");

    depscout(home.path())
        .args(["config", "init", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote config to"));
    assert!(config.exists());

    depscout(home.path())
        .args(["config", "show", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("manifest_name = \"package.json\""));
}

#[test]
fn test_missing_explicit_config_fails() {
    let home = TempDir::new().unwrap();

    depscout(home.path())
        .args(["analyze", "--config"])
        .arg(home.path().join("nope.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}
