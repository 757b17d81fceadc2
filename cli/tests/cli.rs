use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn setup_repo() -> tempfile::TempDir {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join("docs")).unwrap();
    fs::write(root.join("src/lib.rs"), "pub fn greet() {}\n").unwrap();
    fs::write(root.join("src/main.py"), "# stale/main.py\nprint(1)\n").unwrap();
    fs::write(root.join("docs/guide.md"), "# Guide\n").unwrap();
    temp
}

#[allow(deprecated)]
fn pathmark() -> Command {
    Command::cargo_bin("pathmark").expect("binary")
}

#[test]
fn annotates_files_under_src() {
    let temp = setup_repo();
    let root = temp.path();

    pathmark()
        .arg(root)
        .args(["--no-confirm", "--separator", "forward"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 added, 1 updated"));

    assert_eq!(
        fs::read_to_string(root.join("src/lib.rs")).unwrap(),
        "// src/lib.rs\npub fn greet() {}\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("src/main.py")).unwrap(),
        "# src/main.py\nprint(1)\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("docs/guide.md")).unwrap(),
        "# Guide\n"
    );
}

#[test]
fn check_reports_and_fails_until_annotated() {
    let temp = setup_repo();
    let root = temp.path();

    pathmark()
        .arg(root)
        .arg("--check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("missing header"))
        .stdout(predicate::str::contains("stale header (line 1)"));
    assert_eq!(
        fs::read_to_string(root.join("src/lib.rs")).unwrap(),
        "pub fn greet() {}\n"
    );

    pathmark().arg(root).arg("--no-confirm").assert().success();
    pathmark().arg(root).arg("--check").assert().success();
}

#[test]
fn include_path_override() {
    let temp = setup_repo();
    let root = temp.path();

    pathmark()
        .arg(root)
        .args(["--no-confirm", "--include-path", "docs"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(root.join("docs/guide.md")).unwrap(),
        "<!-- docs/guide.md -->\n# Guide\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("src/lib.rs")).unwrap(),
        "pub fn greet() {}\n"
    );
}

#[test]
fn unsupported_single_file_is_skipped() {
    let temp = setup_repo();
    let notes = temp.path().join("src/notes.txt");
    fs::write(&notes, "hello\n").unwrap();

    pathmark()
        .arg(&notes)
        .arg("--no-confirm")
        .assert()
        .success()
        .stdout(predicate::str::contains("unsupported file type: plaintext"));
    assert_eq!(fs::read_to_string(&notes).unwrap(), "hello\n");
}

#[test]
fn lists_languages() {
    pathmark()
        .arg("--list-languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("/* src/example */"))
        .stdout(predicate::str::contains("python"));
}

#[test]
fn rejects_unknown_separator() {
    pathmark()
        .args(["--separator", "diagonal"])
        .assert()
        .failure();
}

#[test]
fn refuses_to_prompt_without_a_terminal() {
    let temp = setup_repo();
    let root = temp.path();

    pathmark()
        .arg(root)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--no-confirm"));
    assert_eq!(
        fs::read_to_string(root.join("src/lib.rs")).unwrap(),
        "pub fn greet() {}\n"
    );
}
