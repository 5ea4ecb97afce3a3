//! CLI tests for the comp binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn theme() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::create_dir_all(dir.path().join("components")).unwrap();
    fs::write(
        dir.path().join("components/Card.hbs"),
        "<h4>{{comp.title}}</h4><p>{{comp.body}}</p>",
    )
    .unwrap();
    dir
}

fn write_config(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("component.yml");
    fs::write(&path, body).unwrap();
    path
}

fn comp(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("comp").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn test_render_with_args() {
    let dir = theme();
    let config = write_config(dir.path(), &format!("roots: [{:?}]\n", dir.path()));

    comp(&config)
        .args(["render", "Card", "-a", "title=Apple", "-a", "body=Lorem Ipsum"])
        .assert()
        .success()
        .stdout("<h4>Apple</h4><p>Lorem Ipsum</p>");
}

#[test]
fn test_render_missing_template_fails() {
    let dir = theme();
    let config = write_config(dir.path(), &format!("roots: [{:?}]\n", dir.path()));

    comp(&config)
        .args(["render", "missing-template"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not locate template for missing-template."));
}

#[test]
fn test_root_flag_overrides_config() {
    let dir = theme();
    let empty = TempDir::new().unwrap();
    let config = write_config(empty.path(), &format!("roots: [{:?}]\n", empty.path()));

    comp(&config)
        .args(["render", "Card", "-a", "title=Google"])
        .arg("--root")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("<h4>Google</h4>"));
}

#[test]
fn test_locate_prints_path() {
    let dir = theme();
    let config = write_config(dir.path(), &format!("roots: [{:?}]\n", dir.path()));
    let expected = dir.path().join("components/Card.hbs");

    comp(&config)
        .args(["locate", "Card"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));
}

#[test]
fn test_plugin_dirs_from_config() {
    let dir = theme();
    let plugin = TempDir::new().unwrap();
    fs::write(plugin.path().join("Simple.hbs"), "plugin simple").unwrap();
    let config = write_config(
        dir.path(),
        &format!("roots: [{:?}]\nplugin-dirs: [{:?}]\n", dir.path(), plugin.path()),
    );

    comp(&config)
        .args(["render", "Simple"])
        .assert()
        .success()
        .stdout("plugin simple");
}

#[test]
fn test_demo_page() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &format!("roots: [{:?}]\n", dir.path()));

    comp(&config)
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("<h3>Cosmonaut</h3>"))
        .stdout(predicate::str::contains("10 + 32 + 95 = 137"))
        .stdout(predicate::str::contains("component-bind"));
}
