use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_bundle() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path();
    fs::write(path.join("a.txt"), "SIG_A\na2\na3\n").unwrap();
    fs::write(path.join("b.txt"), "SIG_B\nb2\n").unwrap();
    // combined = a.txt then b.txt
    fs::write(path.join("combined.txt"), "SIG_A\na2\na3\nSIG_B\nb2\n").unwrap();
    dir
}

fn peek(dir: &TempDir, pattern: &str, line: &str) -> assert_cmd::assert::Assert {
    let mut cmd = assert_cmd::Command::cargo_bin("peek-line").unwrap();
    cmd.arg(dir.path()).arg(pattern).arg("combined.txt").arg(line).assert()
}

#[test]
fn text_output_for_each_line() {
    let dir = setup_bundle();
    let expected = [
        ("1", "Line 1 in file a.txt"),
        ("3", "Line 3 in file a.txt"),
        ("4", "Line 1 in file b.txt"),
        ("5", "Line 2 in file b.txt"),
    ];
    for (line, want) in expected {
        peek(&dir, "?.txt", line)
            .success()
            .stdout(predicate::str::diff(format!("{want}\n")));
    }
}

#[test]
fn pattern_matching_combined_file_still_resolves() {
    let dir = setup_bundle();
    peek(&dir, "*.txt", "5")
        .success()
        .stdout(predicate::str::contains("Line 2 in file b.txt"));
}

#[test]
fn json_output_parses_as_location() {
    let dir = setup_bundle();
    let mut cmd = assert_cmd::Command::cargo_bin("peek-line").unwrap();
    let assert = cmd
        .arg("--format")
        .arg("json")
        .arg(dir.path())
        .arg("?.txt")
        .arg("combined.txt")
        .arg("4")
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(assert.get_output().stdout.as_ref()).to_string();
    let loc: peek_line::Location = serde_json::from_str(&stdout).expect("valid json schema");
    assert_eq!(loc.file.as_str(), "b.txt");
    assert_eq!(loc.line, 1);
    assert_eq!(loc.boundary, 4);
}

#[test]
fn yaml_output() {
    let dir = setup_bundle();
    let mut cmd = assert_cmd::Command::cargo_bin("peek-line").unwrap();
    cmd.args(["-f", "yaml"])
        .arg(dir.path())
        .arg("?.txt")
        .arg("combined.txt")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("file: a.txt"))
        .stdout(predicate::str::contains("line: 2"));
}

#[test]
fn dump_boundaries_goes_to_stderr() {
    let dir = setup_bundle();
    let mut cmd = assert_cmd::Command::cargo_bin("peek-line").unwrap();
    let assert = cmd
        .arg("--dump-boundaries")
        .arg(dir.path())
        .arg("?.txt")
        .arg("combined.txt")
        .arg("1")
        .assert()
        .success();
    let stderr = String::from_utf8_lossy(assert.get_output().stderr.as_ref()).to_string();
    let bounds: Vec<peek_line::Boundary> = serde_json::from_str(&stderr).expect("boundary json");
    let lines: Vec<u32> = bounds.iter().map(|b| b.line).collect();
    assert_eq!(lines, vec![1, 4]);
}

#[test]
fn absolute_combined_path_is_used_as_is() {
    let dir = setup_bundle();
    let other = TempDir::new().unwrap();
    let combined = other.path().join("bundle.out");
    fs::write(&combined, "junk\nSIG_B\nb2\n").unwrap();
    let mut cmd = assert_cmd::Command::cargo_bin("peek-line").unwrap();
    cmd.arg(dir.path())
        .arg("?.txt")
        .arg(&combined)
        .arg("3")
        .assert()
        .success()
        .stdout(predicate::str::contains("Line 2 in file b.txt"));
}

#[test]
fn latin1_bytes_in_sources_and_bundle() {
    let dir = TempDir::new().unwrap();
    let path = dir.path();
    fs::write(path.join("a.s"), b"; \xa9 1998 boot\nmov ax, 1\n").unwrap();
    fs::write(path.join("b.s"), b"SIG_B\n; caf\xe9\nnop\n").unwrap();
    fs::write(path.join("combined.txt"), b"; \xa9 1998 boot\nmov ax, 1\nSIG_B\n; caf\xe9\nnop\n").unwrap();
    for (line, want) in [("2", "Line 2 in file a.s"), ("5", "Line 3 in file b.s")] {
        let mut cmd = assert_cmd::Command::cargo_bin("peek-line").unwrap();
        cmd.arg(path)
            .arg("*.s")
            .arg("combined.txt")
            .arg(line)
            .assert()
            .success()
            .stdout(predicate::str::diff(format!("{want}\n")));
    }
}
