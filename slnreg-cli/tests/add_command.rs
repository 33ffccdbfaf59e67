use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;

use slnreg_core::registry;
use tempfile::TempDir;

fn slnreg_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("slnreg"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn touch_project(root: &Path, rel: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(&path, "<Project />").expect("write project");
    path
}

fn new_solution(dir: &TempDir) -> PathBuf {
    registry::create_registry_at(dir.path(), "app").expect("create solution")
}

#[test]
fn add_infers_folders_and_writes_solution() {
    let dir = TempDir::new().unwrap();
    let sln = new_solution(&dir);
    let a = touch_project(dir.path(), "src/A/A.csproj");
    let b = touch_project(dir.path(), "src/B/B.csproj");

    slnreg_cmd()
        .arg("add")
        .arg(&sln)
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stdout(contains("Added 'A.csproj'").and(contains("under 'src'")));

    let reg = registry::load_registry_at(&sln).expect("reload");
    assert_eq!(reg.project_count(), 2);
    assert_eq!(reg.group_count(), 1);
}

#[test]
fn add_accepts_project_directories() {
    let dir = TempDir::new().unwrap();
    new_solution(&dir);
    touch_project(dir.path(), "tools/Gen/Gen.csproj");

    slnreg_cmd()
        .arg("add")
        .arg(dir.path())
        .arg(dir.path().join("tools/Gen"))
        .assert()
        .success()
        .stdout(contains("Gen.csproj"));
}

#[test]
fn second_add_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let sln = new_solution(&dir);
    let a = touch_project(dir.path(), "src/A/A.csproj");

    slnreg_cmd().arg("add").arg(&sln).arg(&a).assert().success();
    let before = fs::read(&sln).unwrap();

    slnreg_cmd()
        .arg("add")
        .arg(&sln)
        .arg(&a)
        .assert()
        .success()
        .stdout(contains("already in").and(contains("left unchanged")));
    assert_eq!(fs::read(&sln).unwrap(), before);
}

#[test]
fn in_root_and_solution_folder_conflict() {
    let dir = TempDir::new().unwrap();
    let sln = new_solution(&dir);
    let before = fs::read(&sln).unwrap();
    let a = touch_project(dir.path(), "src/A/A.csproj");

    slnreg_cmd()
        .arg("add")
        .arg(&sln)
        .arg(&a)
        .arg("--in-root")
        .arg("--solution-folder")
        .arg("libs")
        .assert()
        .failure()
        .stderr(contains("cannot be used together"));
    assert_eq!(fs::read(&sln).unwrap(), before);
}

#[test]
fn solution_folder_overrides_location() {
    let dir = TempDir::new().unwrap();
    let sln = new_solution(&dir);
    let a = touch_project(dir.path(), "src/A/A.csproj");

    slnreg_cmd()
        .args(["add", "--solution-folder", "shared/core"])
        .arg(&sln)
        .arg(&a)
        .assert()
        .success()
        .stdout(contains("under 'shared/core'"));

    let reg = registry::load_registry_at(&sln).unwrap();
    let entry = &reg.projects()[0];
    assert_eq!(reg.folder_path(entry.group.unwrap()), "shared/core");
}

#[test]
fn add_without_projects_fails() {
    let dir = TempDir::new().unwrap();
    let sln = new_solution(&dir);

    slnreg_cmd()
        .arg("add")
        .arg(&sln)
        .assert()
        .failure()
        .stderr(contains("no projects"));
}

#[test]
fn add_missing_path_names_it() {
    let dir = TempDir::new().unwrap();
    let sln = new_solution(&dir);

    slnreg_cmd()
        .arg("add")
        .arg(&sln)
        .arg(dir.path().join("Ghost/Ghost.csproj"))
        .assert()
        .failure()
        .stderr(contains("Ghost.csproj").and(contains("does not exist")));
}

#[test]
fn new_then_list_shows_projects() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("repo");

    slnreg_cmd()
        .args(["new", "--name", "repo"])
        .arg(&root)
        .assert()
        .success()
        .stdout(contains("repo.sln.yaml"));

    let a = touch_project(&root, "src/A/A.csproj");
    slnreg_cmd().arg("add").arg(&root).arg(&a).assert().success();

    let output = slnreg_cmd().arg("list").arg(&root).arg("--json").output().unwrap();
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["name"], "A");
    assert_eq!(rows[0]["folder"], "src");
    assert_eq!(rows[0]["path"], "src/A/A.csproj");
}

#[test]
fn new_refuses_existing_solution() {
    let dir = TempDir::new().unwrap();
    new_solution(&dir);

    slnreg_cmd()
        .args(["new", "--name", "app"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("already exists"));
}
